use chrono::Utc;
use rusqlite::{Connection, params};
use tracing::info;

use crate::error::AppError;
use crate::models::delivery::DeliveryStatus;

struct SeedDriver {
    id: i64,
    name: &'static str,
    phone: &'static str,
}

struct SeedDelivery {
    id: i64,
    order_number: &'static str,
    customer_name: &'static str,
    address: &'static str,
    status: DeliveryStatus,
    driver_id: i64,
}

const DRIVERS: [SeedDriver; 3] = [
    SeedDriver { id: 1, name: "Ayush Sharma", phone: "785524441" },
    SeedDriver { id: 2, name: "Vikas Kumar", phone: "7852255562" },
    SeedDriver { id: 3, name: "Vijay Kumar", phone: "7452639654" },
];

const DELIVERIES: [SeedDelivery; 3] = [
    SeedDelivery {
        id: 1,
        order_number: "1",
        customer_name: "Vinay Ninave",
        address: "Mahal Nagpur",
        status: DeliveryStatus::Pending,
        driver_id: 1,
    },
    SeedDelivery {
        id: 2,
        order_number: "2",
        customer_name: "Aaliya Ali",
        address: "Wadi Higana",
        status: DeliveryStatus::OutForDelivery,
        driver_id: 2,
    },
    SeedDelivery {
        id: 3,
        order_number: "3",
        customer_name: "Piyush Lomte",
        address: "Friend Colony",
        status: DeliveryStatus::Delivered,
        driver_id: 3,
    },
];

/// Upserts the sample drivers and deliveries by primary key.
pub fn apply(conn: &Connection) -> Result<(), AppError> {
    let now = Utc::now();

    for driver in &DRIVERS {
        conn.execute(
            "INSERT INTO drivers (id, name, phone) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, phone = excluded.phone",
            params![driver.id, driver.name, driver.phone],
        )?;
    }

    for delivery in &DELIVERIES {
        conn.execute(
            "INSERT INTO deliveries
                (id, order_number, customer_name, address, status, estimated_delivery, updated_at, driver_id)
             VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                order_number = excluded.order_number,
                customer_name = excluded.customer_name,
                address = excluded.address,
                status = excluded.status,
                estimated_delivery = excluded.estimated_delivery,
                updated_at = excluded.updated_at,
                driver_id = excluded.driver_id",
            params![
                delivery.id,
                delivery.order_number,
                delivery.customer_name,
                delivery.address,
                delivery.status,
                now,
                delivery.driver_id,
            ],
        )?;
    }

    info!(
        drivers = DRIVERS.len(),
        deliveries = DELIVERIES.len(),
        "seed data applied"
    );
    Ok(())
}
