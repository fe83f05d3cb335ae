use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_SECRET_KEY: &str = "dev-secret-change";

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub database_path: PathBuf,
    pub schema_path: PathBuf,
    pub secret_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 5000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            database_path: parse_or_default("DATABASE_PATH", PathBuf::from("delivery.db"))?,
            schema_path: parse_or_default("SCHEMA_PATH", PathBuf::from("schema.sql"))?,
            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string()),
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_or_default;

    #[test]
    fn missing_variable_falls_back_to_default() {
        let port: u16 = parse_or_default("DELIVERY_TRACKER_TEST_UNSET_PORT", 5000).unwrap();
        assert_eq!(port, 5000);
    }
}
