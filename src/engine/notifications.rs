use tracing::info;

use crate::error::AppError;
use crate::storage::{Database, notifications};

pub async fn mark_all_read(db: &Database) -> Result<usize, AppError> {
    let updated = db.write(|tx| notifications::mark_all_read(tx)).await?;
    info!(updated, "notifications marked as read");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::setup_db;

    #[tokio::test]
    async fn leaves_no_unread_notifications_and_is_idempotent() {
        let (db, _dir) = setup_db().await;
        db.write(|tx| {
            notifications::push(tx, "first")?;
            notifications::push(tx, "second")
        })
        .await
        .unwrap();

        assert_eq!(mark_all_read(&db).await.unwrap(), 2);
        assert_eq!(mark_all_read(&db).await.unwrap(), 0);

        let unread = db
            .read(|conn| notifications::unread_count(conn))
            .await
            .unwrap();
        assert_eq!(unread, 0);
    }
}
