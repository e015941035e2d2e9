//! # Error Types
//!
//! Domain-specific error types for warehouse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  warehouse-core errors (this file)                                     │
//! │  └── ValidationError  - Payload quantity / identifier failures         │
//! │                                                                         │
//! │  warehouse-db errors (separate crate)                                  │
//! │  ├── DbError          - Store operation failures                       │
//! │  └── InventoryError   - Engine failure kinds                           │
//! │                                                                         │
//! │  warehouse-api errors (in app)                                         │
//! │  └── ApiError         - What the HTTP caller sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → InventoryError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Upload payload validation errors.
///
/// Raised while turning wire text into store values. Any of these aborts
/// the whole upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Quantity text is not a whole decimal number.
    #[error("{field} '{value}' is not a valid quantity")]
    InvalidQuantity { field: String, value: String },

    /// Quantity is negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: i64 },

    /// Quantity must be at least one.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "art_id".to_string(),
        };
        assert_eq!(err.to_string(), "art_id is required");

        let err = ValidationError::InvalidQuantity {
            field: "stock".to_string(),
            value: "12a".to_string(),
        };
        assert_eq!(err.to_string(), "stock '12a' is not a valid quantity");

        let err = ValidationError::MustBePositive {
            field: "amount_of".to_string(),
            value: 0,
        };
        assert_eq!(err.to_string(), "amount_of must be positive, got 0");
    }
}
