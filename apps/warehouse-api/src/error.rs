//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Warehouse API                      │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  POST /warehouse/v1/product/Dining%20Chair                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler                                                         │  │
//! │  │  Result<Json<ResponseProduct>, ApiError>                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Engine Error? ─── InventoryError::OutOfStock ─────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad JSON body? ─── JsonRejection ──────────────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄── 409 {"code": "OUT_OF_STOCK",                                       │
//! │           "message": "this product is not in stock, cannot be sold"}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use warehouse_db::{DbError, InventoryError};

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "this product is not in system, cannot be sold"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not registered (404)
    NotFound,

    /// Product registered but its articles can't cover a unit (409)
    OutOfStock,

    /// Submitted data rejected by parsing or a store constraint (400)
    ValidationError,

    /// Body isn't the expected JSON (400)
    MalformedRequest,

    /// Store statement or transaction failed (500)
    DatabaseError,

    /// Store unreachable (503)
    Unavailable,

    /// Request deadline passed (504)
    Timeout,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::OutOfStock => StatusCode::CONFLICT,
            ErrorCode::ValidationError | ErrorCode::MalformedRequest => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts engine errors to API errors.
impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::ProductNotFound { .. } => {
                ApiError::new(ErrorCode::NotFound, err.to_string())
            }
            InventoryError::OutOfStock { .. } => {
                ApiError::new(ErrorCode::OutOfStock, err.to_string())
            }
            InventoryError::Write(ref db) if db.is_client_fault() => {
                ApiError::new(ErrorCode::ValidationError, client_message(db))
            }
            InventoryError::Write(e) => {
                // Log the actual error but return a generic message
                tracing::error!(err = %e, "Store write failed");
                ApiError::new(ErrorCode::DatabaseError, "Database write failed")
            }
            InventoryError::Query(e) => {
                tracing::error!(err = %e, "Store query failed");
                ApiError::new(ErrorCode::DatabaseError, "Database query failed")
            }
            InventoryError::Connectivity(e) => {
                tracing::error!(err = %e, "Store unreachable");
                ApiError::new(ErrorCode::Unavailable, "Database unavailable")
            }
            InventoryError::DeadlineExceeded { operation } => ApiError::new(
                ErrorCode::Timeout,
                format!("{} did not finish before the request deadline", operation),
            ),
        }
    }
}

/// Converts body extraction failures to API errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::MalformedRequest, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Message for a rejected upload; names the offending value without
/// leaking store internals.
fn client_message(err: &DbError) -> String {
    match err {
        DbError::InvalidValue(e) => e.to_string(),
        DbError::UniqueViolation(_) => {
            "upload contains a product/article pair that already exists".to_string()
        }
        DbError::CheckViolation(_) => "upload violates a stock constraint".to_string(),
        DbError::ForeignKeyViolation(_) => "upload references an unknown record".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warehouse_core::ValidationError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                InventoryError::ProductNotFound {
                    product: "Sofa".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                InventoryError::OutOfStock {
                    product: "Sofa".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                InventoryError::Write(DbError::UniqueViolation("pk".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                InventoryError::Write(DbError::InvalidValue(ValidationError::Required {
                    field: "art_id".to_string(),
                })),
                StatusCode::BAD_REQUEST,
            ),
            (
                InventoryError::Write(DbError::TransactionFailed("commit".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                InventoryError::Query(DbError::QueryFailed("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                InventoryError::Connectivity(DbError::PoolExhausted),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                InventoryError::DeadlineExceeded {
                    operation: "sell_product",
                },
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];

        for (err, status) in cases {
            let label = format!("{err:?}");
            assert_eq!(ApiError::from(err).status(), status, "{label}");
        }
    }

    #[test]
    fn test_sale_messages_pass_through() {
        let api = ApiError::from(InventoryError::ProductNotFound {
            product: "Sofa".to_string(),
        });
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "this product is not in system, cannot be sold");
    }

    #[test]
    fn test_serialized_shape() {
        let api = ApiError::new(ErrorCode::OutOfStock, "gone");
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json, serde_json::json!({"code": "OUT_OF_STOCK", "message": "gone"}));
    }
}
