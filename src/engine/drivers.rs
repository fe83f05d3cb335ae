use tracing::info;

use crate::error::AppError;
use crate::models::driver::{Driver, NewDriver};
use crate::storage::{Database, drivers, notifications};

pub async fn list(db: &Database) -> Result<Vec<Driver>, AppError> {
    db.read(|conn| drivers::list(conn)).await
}

pub async fn create(db: &Database, driver: NewDriver) -> Result<i64, AppError> {
    let id = db
        .write(move |tx| {
            let id = drivers::insert(tx, &driver)?;
            notifications::push(tx, &format!("New driver added: {}", driver.name))?;
            Ok(id)
        })
        .await?;

    info!(driver_id = id, "driver created");
    Ok(id)
}
