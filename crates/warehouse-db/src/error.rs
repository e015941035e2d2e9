//! # Store and Engine Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)      ValidationError (warehouse-core)      │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  DbError (this module) ← categorised store failure                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryError ← which engine step failed (connectivity, query,       │
//! │       │           write) or which business rule rejected the call      │
//! │       ▼                                                                 │
//! │  ApiError (in warehouse-api) ← status code + message                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;
use warehouse_core::ValidationError;

// =============================================================================
// DbError
// =============================================================================

/// Store operation errors.
///
/// These wrap sqlx errors and payload validation failures with enough
/// categorisation for the caller to pick a status code.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Uploading the same (product, article) pair twice
    #[error("Duplicate entry: {0}")]
    UniqueViolation(String),

    /// CHECK constraint violation.
    ///
    /// ## When This Occurs
    /// - A decrement would push an article's stock below zero
    /// - A non-positive amount slipped past payload parsing
    #[error("Constraint violated: {0}")]
    CheckViolation(String),

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// An upload row could not be turned into a storable value.
    #[error("Invalid value: {0}")]
    InvalidValue(#[from] ValidationError),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be opened or created
    /// - Pool has been closed
    /// - I/O error talking to the database
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin or commit failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Wraps a failure to begin or commit a transaction.
    ///
    /// Pool and I/O failures keep their connectivity category.
    pub fn transaction(stage: &str, err: sqlx::Error) -> Self {
        match DbError::from(err) {
            DbError::Internal(msg) | DbError::QueryFailed(msg) => {
                DbError::TransactionFailed(format!("{stage}: {msg}"))
            }
            other => other,
        }
    }

    /// True when the store itself could not be reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_) | DbError::PoolExhausted)
    }

    /// True when the failure was caused by the submitted data rather than
    /// the store.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            DbError::UniqueViolation(_)
                | DbError::CheckViolation(_)
                | DbError::ForeignKeyViolation(_)
                | DbError::InvalidValue(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database (unique)       → DbError::UniqueViolation
/// sqlx::Error::Database (check)        → DbError::CheckViolation
/// sqlx::Error::Database (foreign key)  → DbError::ForeignKeyViolation
/// sqlx::Error::Database (other)        → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut            → DbError::PoolExhausted
/// sqlx::Error::PoolClosed / Io         → DbError::ConnectionFailed
/// Other                                → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation(msg),
                    ErrorKind::CheckViolation => DbError::CheckViolation(msg),
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation(msg),
                    _ => DbError::QueryFailed(msg),
                }
            }

            sqlx::Error::RowNotFound => DbError::QueryFailed("no rows returned".to_string()),

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// InventoryError
// =============================================================================

/// Failure kinds of the inventory engine.
///
/// Every store failure aborts the current transaction before it is
/// returned. Nothing is retried.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The store could not be reached.
    #[error("store unreachable: {0}")]
    Connectivity(#[source] DbError),

    /// A read statement, or starting the transaction, failed.
    #[error("query failed: {0}")]
    Query(#[source] DbError),

    /// An insert, update or commit failed.
    #[error("write failed: {0}")]
    Write(#[source] DbError),

    /// The product has no composition rows.
    #[error("this product is not in system, cannot be sold")]
    ProductNotFound { product: String },

    /// At least one article of the product is short.
    #[error("this product is not in stock, cannot be sold")]
    OutOfStock { product: String },

    /// The caller's deadline passed before the operation finished.
    #[error("deadline exceeded during {operation}")]
    DeadlineExceeded { operation: &'static str },
}

impl InventoryError {
    /// Classifies a failure to start a transaction.
    pub fn begin(err: DbError) -> Self {
        if err.is_connectivity() {
            InventoryError::Connectivity(err)
        } else {
            InventoryError::Query(err)
        }
    }
}

/// Result type for engine operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_rejection_messages() {
        let err = InventoryError::ProductNotFound {
            product: "Sofa".to_string(),
        };
        assert_eq!(err.to_string(), "this product is not in system, cannot be sold");

        let err = InventoryError::OutOfStock {
            product: "Sofa".to_string(),
        };
        assert_eq!(err.to_string(), "this product is not in stock, cannot be sold");
    }

    #[test]
    fn test_pool_errors_are_connectivity() {
        assert!(DbError::from(sqlx::Error::PoolTimedOut).is_connectivity());
        assert!(DbError::from(sqlx::Error::PoolClosed).is_connectivity());
        assert!(matches!(
            InventoryError::begin(DbError::PoolExhausted),
            InventoryError::Connectivity(_)
        ));
        assert!(matches!(
            InventoryError::begin(DbError::TransactionFailed("begin".to_string())),
            InventoryError::Query(_)
        ));
    }

    #[test]
    fn test_validation_is_client_fault() {
        let err: DbError = ValidationError::Required {
            field: "art_id".to_string(),
        }
        .into();
        assert!(err.is_client_fault());
        assert!(!DbError::PoolExhausted.is_client_fault());
    }
}
