use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::AppError;
use crate::models::delivery::{Delivery, DeliveryStatus, NewDelivery};

const SELECT_WITH_DRIVER: &str = "
    SELECT d.id, d.order_number, d.customer_name, d.address, d.status,
           d.estimated_delivery, d.updated_at, d.driver_id,
           COALESCE(dr.name, '') AS driver_name
    FROM deliveries d
    LEFT JOIN drivers dr ON d.driver_id = dr.id";

pub fn list(conn: &Connection) -> Result<Vec<Delivery>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_WITH_DRIVER} ORDER BY d.updated_at DESC, d.id DESC"
    ))?;
    let deliveries = stmt
        .query_map([], row_to_delivery)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(deliveries)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Delivery>, AppError> {
    let delivery = conn
        .query_row(
            &format!("{SELECT_WITH_DRIVER} WHERE d.id = ?1"),
            [id],
            row_to_delivery,
        )
        .optional()?;
    Ok(delivery)
}

/// Inserts a delivery in the `Pending` state and returns its id.
pub fn insert(conn: &Connection, delivery: &NewDelivery) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO deliveries
            (order_number, customer_name, address, status, estimated_delivery, updated_at, driver_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            delivery.order_number,
            delivery.customer_name,
            delivery.address,
            DeliveryStatus::Pending,
            delivery.estimated_delivery,
            Utc::now(),
            delivery.driver_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn order_number(conn: &Connection, id: i64) -> Result<Option<String>, AppError> {
    let order_number = conn
        .query_row(
            "SELECT order_number FROM deliveries WHERE id = ?1",
            [id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(order_number)
}

/// Sets the status and refreshes `updated_at`. Returns the number of rows touched.
pub fn update_status(
    conn: &Connection,
    id: i64,
    status: DeliveryStatus,
) -> Result<usize, AppError> {
    let updated = conn.execute(
        "UPDATE deliveries SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status, Utc::now(), id],
    )?;
    Ok(updated)
}

pub fn count(conn: &Connection) -> Result<i64, AppError> {
    let count = conn.query_row("SELECT COUNT(*) FROM deliveries", [], |row| row.get(0))?;
    Ok(count)
}

fn row_to_delivery(row: &Row<'_>) -> rusqlite::Result<Delivery> {
    Ok(Delivery {
        id: row.get(0)?,
        order_number: row.get(1)?,
        customer_name: row.get(2)?,
        address: row.get(3)?,
        status: row.get(4)?,
        estimated_delivery: row.get(5)?,
        updated_at: row.get(6)?,
        driver_id: row.get(7)?,
        driver_name: row.get(8)?,
    })
}
