use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::delivery::non_empty;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDriver {
    pub name: String,
    pub phone: Option<String>,
}

impl NewDriver {
    pub fn new(name: &str, phone: &str) -> Result<Self, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Driver name is required.".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            phone: non_empty(phone),
        })
    }
}
