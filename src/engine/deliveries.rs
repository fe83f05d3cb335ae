use tracing::{info, warn};

use crate::error::AppError;
use crate::models::delivery::{Delivery, DeliveryStatus, NewDelivery};
use crate::models::notification::Notification;
use crate::storage::{Database, deliveries, drivers, notifications};

pub const FEED_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub deliveries: Vec<Delivery>,
    pub notifications: Vec<Notification>,
    pub unread_notifications: i64,
}

pub async fn dashboard(db: &Database) -> Result<Dashboard, AppError> {
    db.read(|conn| {
        Ok(Dashboard {
            deliveries: deliveries::list(conn)?,
            notifications: notifications::recent(conn, FEED_SIZE)?,
            unread_notifications: notifications::unread_count(conn)?,
        })
    })
    .await
}

/// Stores a new `Pending` delivery and announces it in the notification feed.
pub async fn create(db: &Database, delivery: NewDelivery) -> Result<i64, AppError> {
    let id = db
        .write(move |tx| {
            if let Some(driver_id) = delivery.driver_id {
                if !drivers::exists(tx, driver_id)? {
                    return Err(AppError::Validation(
                        "Selected driver does not exist.".to_string(),
                    ));
                }
            }

            let id = deliveries::insert(tx, &delivery)?;
            notifications::push(
                tx,
                &format!("New delivery created: {}", delivery.order_number),
            )?;
            Ok(id)
        })
        .await?;

    info!(delivery_id = id, "delivery created");
    Ok(id)
}

pub async fn detail(db: &Database, id: i64) -> Result<Delivery, AppError> {
    db.read(move |conn| deliveries::get(conn, id))
        .await?
        .ok_or_else(not_found)
}

pub async fn update_status(
    db: &Database,
    id: i64,
    status: DeliveryStatus,
) -> Result<Delivery, AppError> {
    let delivery = db
        .write(move |tx| {
            let order_number = deliveries::order_number(tx, id)?.ok_or_else(not_found)?;

            deliveries::update_status(tx, id, status)?;
            notifications::push(
                tx,
                &format!("Delivery {order_number} status updated to {status}"),
            )?;

            deliveries::get(tx, id)?.ok_or_else(not_found)
        })
        .await
        .inspect_err(|err| {
            if matches!(err, AppError::NotFound(_)) {
                warn!(delivery_id = id, "status update for unknown delivery");
            }
        })?;

    info!(delivery_id = id, status = %status, "delivery status updated");
    Ok(delivery)
}

fn not_found() -> AppError {
    AppError::NotFound("Delivery not found.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::drivers as driver_actions;
    use crate::models::driver::NewDriver;
    use crate::storage::test_support::setup_db;

    fn jane() -> NewDelivery {
        NewDelivery::new("42", "Jane Doe", "1 Main St", "", None).unwrap()
    }

    #[tokio::test]
    async fn create_stores_pending_and_notifies() {
        let (db, _dir) = setup_db().await;

        let id = create(&db, jane()).await.unwrap();
        let delivery = detail(&db, id).await.unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Pending);

        let board = dashboard(&db).await.unwrap();
        assert_eq!(board.deliveries.len(), 1);
        assert_eq!(board.notifications[0].message, "New delivery created: 42");
        assert_eq!(board.unread_notifications, 1);
    }

    #[tokio::test]
    async fn create_with_unknown_driver_persists_nothing() {
        let (db, _dir) = setup_db().await;

        let mut delivery = jane();
        delivery.driver_id = Some(99);
        let err = create(&db, delivery).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let board = dashboard(&db).await.unwrap();
        assert!(board.deliveries.is_empty());
        assert!(board.notifications.is_empty());
    }

    #[tokio::test]
    async fn create_with_known_driver_shows_driver_name() {
        let (db, _dir) = setup_db().await;

        let driver_id = driver_actions::create(&db, NewDriver::new("Vijay Kumar", "").unwrap())
            .await
            .unwrap();
        let mut delivery = jane();
        delivery.driver_id = Some(driver_id);

        let id = create(&db, delivery).await.unwrap();
        assert_eq!(detail(&db, id).await.unwrap().driver_name, "Vijay Kumar");
    }

    #[tokio::test]
    async fn detail_of_missing_delivery_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = detail(&db, 1).await.unwrap_err();
        assert_eq!(err.user_message(), "Delivery not found.");
    }

    #[tokio::test]
    async fn update_status_refreshes_timestamp_and_notifies() {
        let (db, _dir) = setup_db().await;
        let id = create(&db, jane()).await.unwrap();
        let created = detail(&db, id).await.unwrap();

        let updated = update_status(&db, id, DeliveryStatus::Delivered)
            .await
            .unwrap();

        assert_eq!(updated.status, DeliveryStatus::Delivered);
        assert!(updated.updated_at > created.updated_at);

        let board = dashboard(&db).await.unwrap();
        assert_eq!(
            board.notifications[0].message,
            "Delivery 42 status updated to Delivered"
        );
    }

    #[tokio::test]
    async fn update_status_of_missing_delivery_writes_nothing() {
        let (db, _dir) = setup_db().await;

        let err = update_status(&db, 5, DeliveryStatus::Failed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let board = dashboard(&db).await.unwrap();
        assert!(board.notifications.is_empty());
    }
}
