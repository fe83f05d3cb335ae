use rusqlite::{Connection, params};

use crate::error::AppError;
use crate::models::driver::{Driver, NewDriver};

pub fn list(conn: &Connection) -> Result<Vec<Driver>, AppError> {
    let mut stmt = conn.prepare("SELECT id, name, phone FROM drivers ORDER BY name, id")?;
    let drivers = stmt
        .query_map([], |row| {
            Ok(Driver {
                id: row.get(0)?,
                name: row.get(1)?,
                phone: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(drivers)
}

pub fn insert(conn: &Connection, driver: &NewDriver) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO drivers (name, phone) VALUES (?1, ?2)",
        params![driver.name, driver.phone],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn exists(conn: &Connection, id: i64) -> Result<bool, AppError> {
    let found: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM drivers WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    Ok(found != 0)
}

pub fn count(conn: &Connection) -> Result<i64, AppError> {
    let count = conn.query_row("SELECT COUNT(*) FROM drivers", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::setup_db;

    #[tokio::test]
    async fn list_orders_by_name() {
        let (db, _dir) = setup_db().await;

        let drivers = db
            .write(|tx| {
                insert(tx, &NewDriver::new("Vijay Kumar", "7452639654")?)?;
                insert(tx, &NewDriver::new("Ayush Sharma", "")?)?;
                list(tx)
            })
            .await
            .unwrap();

        let names: Vec<_> = drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Ayush Sharma", "Vijay Kumar"]);
        assert_eq!(drivers[0].phone, None);
        assert_eq!(drivers[1].phone.as_deref(), Some("7452639654"));
    }

    #[tokio::test]
    async fn exists_reports_known_ids_only() {
        let (db, _dir) = setup_db().await;

        let (known, unknown) = db
            .write(|tx| {
                let id = insert(tx, &NewDriver::new("Ayush Sharma", "")?)?;
                Ok((exists(tx, id)?, exists(tx, id + 1)?))
            })
            .await
            .unwrap();

        assert!(known);
        assert!(!unknown);
    }
}
