use chrono::Utc;
use rusqlite::{Connection, Row, params};

use crate::error::AppError;
use crate::models::notification::Notification;

/// Appends an unread notification stamped with the current time.
pub fn push(conn: &Connection, message: &str) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO notifications (message, created_at, is_read) VALUES (?1, ?2, 0)",
        params![message, Utc::now()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn recent(conn: &Connection, limit: u32) -> Result<Vec<Notification>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, message, created_at, is_read
         FROM notifications
         ORDER BY created_at DESC, id DESC
         LIMIT ?1",
    )?;
    let notifications = stmt
        .query_map([limit], row_to_notification)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notifications)
}

pub fn mark_all_read(conn: &Connection) -> Result<usize, AppError> {
    let updated = conn.execute("UPDATE notifications SET is_read = 1 WHERE is_read = 0", [])?;
    Ok(updated)
}

pub fn unread_count(conn: &Connection) -> Result<i64, AppError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE is_read = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn row_to_notification(row: &Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: row.get(0)?,
        message: row.get(1)?,
        created_at: row.get(2)?,
        is_read: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::setup_db;

    #[tokio::test]
    async fn recent_returns_newest_first_and_respects_limit() {
        let (db, _dir) = setup_db().await;

        let recent = db
            .write(|tx| {
                for n in 0..12 {
                    push(tx, &format!("event {n}"))?;
                }
                recent(tx, 10)
            })
            .await
            .unwrap();

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].message, "event 11");
        assert_eq!(recent[9].message, "event 2");
        assert!(recent.iter().all(|n| !n.is_read));
    }

    #[tokio::test]
    async fn mark_all_read_is_idempotent() {
        let (db, _dir) = setup_db().await;

        let (first, second, unread) = db
            .write(|tx| {
                push(tx, "one")?;
                push(tx, "two")?;
                let first = mark_all_read(tx)?;
                let second = mark_all_read(tx)?;
                Ok((first, second, unread_count(tx)?))
            })
            .await
            .unwrap();

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(unread, 0);
    }
}
