//! Response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use warehouse_core::{ProductAvailability, StockRecord};

/// Success body shared by the inventory and product endpoints.
///
/// Exactly one field is set per response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<StockRecord>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_stocks: Option<Vec<ProductAvailability>>,
}

impl ResponseProduct {
    pub fn message(message: impl Into<String>) -> Self {
        ResponseProduct {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn inventory(inventory: Vec<StockRecord>) -> Self {
        ResponseProduct {
            inventory: Some(inventory),
            ..Default::default()
        }
    }

    /// Available products, or the "nothing in stock" message when empty.
    pub fn product_stocks(stocks: Vec<ProductAvailability>) -> Self {
        if stocks.is_empty() {
            return ResponseProduct::message("No product in stock");
        }
        ResponseProduct {
            product_stocks: Some(stocks),
            ..Default::default()
        }
    }
}

/// Health probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(healthy: bool, version: impl Into<String>) -> Self {
        HealthResponse {
            message: if healthy {
                "healthy endpoint"
            } else {
                "unhealthy endpoint"
            },
            version: version.into(),
            timestamp: Utc::now(),
        }
    }
}
