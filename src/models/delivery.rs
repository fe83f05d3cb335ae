use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::Pending,
        DeliveryStatus::OutForDelivery,
        DeliveryStatus::Delivered,
        DeliveryStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::OutForDelivery => "Out for Delivery",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        DeliveryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| AppError::Validation("Invalid status.".to_string()))
    }
}

impl ToSql for DeliveryStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for DeliveryStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;
        raw.parse()
            .map_err(|_| FromSqlError::Other(format!("unknown delivery status {raw:?}").into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub address: String,
    pub status: DeliveryStatus,
    pub estimated_delivery: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub driver_id: Option<i64>,
    pub driver_name: String,
}

/// Validated input for a delivery that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDelivery {
    pub order_number: String,
    pub customer_name: String,
    pub address: String,
    pub estimated_delivery: Option<String>,
    pub driver_id: Option<i64>,
}

impl NewDelivery {
    pub fn new(
        order_number: &str,
        customer_name: &str,
        address: &str,
        estimated_delivery: &str,
        driver_id: Option<&str>,
    ) -> Result<Self, AppError> {
        let order_number = order_number.trim();
        let customer_name = customer_name.trim();
        let address = address.trim();

        if order_number.is_empty() || customer_name.is_empty() || address.is_empty() {
            return Err(AppError::Validation(
                "Order number, customer name, and address are required.".to_string(),
            ));
        }

        let driver_id = match driver_id.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                AppError::Validation("Selected driver does not exist.".to_string())
            })?),
            None => None,
        };

        Ok(Self {
            order_number: order_number.to_string(),
            customer_name: customer_name.to_string(),
            address: address.to_string(),
            estimated_delivery: non_empty(estimated_delivery),
            driver_id,
        })
    }
}

pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_status_label() {
        for status in DeliveryStatus::ALL {
            assert_eq!(status.as_str().parse::<DeliveryStatus>().unwrap(), status);
        }
    }

    #[test]
    fn rejects_status_outside_the_enum() {
        assert!("Cancelled".parse::<DeliveryStatus>().is_err());
        assert!("delivered".parse::<DeliveryStatus>().is_err());
        assert!("".parse::<DeliveryStatus>().is_err());
    }

    #[test]
    fn new_delivery_trims_fields() {
        let delivery = NewDelivery::new(" 42 ", " Jane Doe", "1 Main St ", "  ", Some("")).unwrap();

        assert_eq!(delivery.order_number, "42");
        assert_eq!(delivery.customer_name, "Jane Doe");
        assert_eq!(delivery.address, "1 Main St");
        assert_eq!(delivery.estimated_delivery, None);
        assert_eq!(delivery.driver_id, None);
    }

    #[test]
    fn new_delivery_requires_order_customer_and_address() {
        for (order, customer, address) in [
            ("", "Jane Doe", "1 Main St"),
            ("42", "   ", "1 Main St"),
            ("42", "Jane Doe", ""),
        ] {
            let err = NewDelivery::new(order, customer, address, "", None).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[test]
    fn new_delivery_rejects_non_numeric_driver() {
        let err = NewDelivery::new("42", "Jane Doe", "1 Main St", "", Some("abc")).unwrap_err();
        assert_eq!(err.user_message(), "Selected driver does not exist.");
    }

    #[test]
    fn new_delivery_keeps_driver_and_estimate() {
        let delivery =
            NewDelivery::new("42", "Jane Doe", "1 Main St", "2026-10-20", Some("3")).unwrap();
        assert_eq!(delivery.estimated_delivery.as_deref(), Some("2026-10-20"));
        assert_eq!(delivery.driver_id, Some(3));
    }
}
