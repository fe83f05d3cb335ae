//! SQLite persistence for deliveries, drivers and notifications.
//!
//! Every action opens its own connection, runs on the blocking pool and drops
//! the connection when the closure returns. Writes run inside one IMMEDIATE
//! transaction so SQLite's file lock serializes concurrent writers.

pub mod deliveries;
pub mod drivers;
pub mod notifications;
pub mod seed;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::{debug, info};

use crate::error::AppError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Drops and recreates all tables by running the schema script at `schema_path`.
    pub async fn initialize(&self, schema_path: &Path) -> Result<(), AppError> {
        let script = tokio::fs::read_to_string(schema_path).await.map_err(|err| {
            AppError::Internal(format!(
                "failed to read schema {}: {err}",
                schema_path.display()
            ))
        })?;

        self.write(move |tx| {
            tx.execute_batch(&script)?;
            Ok(())
        })
        .await?;

        info!(path = %self.path.display(), "database initialized");
        Ok(())
    }

    /// Runs `f` against a fresh connection without opening a transaction.
    pub async fn read<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, AppError> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = connect(&path)?;
            f(&conn)
        })
        .await
        .map_err(|err| AppError::Internal(format!("database task failed: {err}")))?
    }

    /// Runs `f` inside a single transaction that commits only if `f` returns `Ok`.
    pub async fn write<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> Result<T, AppError> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = connect(&path)?;
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
        .map_err(|err| AppError::Internal(format!("database task failed: {err}")))?
    }
}

fn connect(path: &Path) -> Result<Connection, AppError> {
    debug!(path = %path.display(), "opening database connection");
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}
