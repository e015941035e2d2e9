//! # Validation Module
//!
//! Quantity parsing for upload payloads and availability reads.
//!
//! ## Two Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quantity Parsing                                   │
//! │                                                                         │
//! │  WRITE PATH (uploads)                 READ PATH (availability)          │
//! │  ─────────────────────                ───────────────────────           │
//! │  parse_stock("12")   → Ok(12)         lenient_count("4")   → 4          │
//! │  parse_stock("-1")   → Err            lenient_count("")    → 0          │
//! │  parse_amount("0")   → Err            lenient_count("n/a") → 0          │
//! │                                                                         │
//! │  A bad value aborts the batch.        A bad value counts as zero and    │
//! │                                       the product is filtered out.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};

/// Parses an article stock quantity. Zero is allowed, negatives are not.
///
/// ```rust
/// use warehouse_core::validation::parse_stock;
///
/// assert_eq!(parse_stock(" 17 ").unwrap(), 17);
/// assert_eq!(parse_stock("0").unwrap(), 0);
/// assert!(parse_stock("-3").is_err());
/// ```
pub fn parse_stock(text: &str) -> ValidationResult<i64> {
    let value = parse_whole("stock", text)?;
    if value < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
            value,
        });
    }
    Ok(value)
}

/// Parses the amount of an article a product consumes. Must be at least one.
pub fn parse_amount(text: &str) -> ValidationResult<i64> {
    let value = parse_whole("amount_of", text)?;
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount_of".to_string(),
            value,
        });
    }
    Ok(value)
}

/// Parses a count, treating anything unparsable as zero.
pub fn lenient_count(text: &str) -> i64 {
    text.trim().parse::<i64>().unwrap_or(0)
}

/// Checks an identifier is present and returns it trimmed.
pub fn require<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value)
}

fn parse_whole(field: &str, text: &str) -> ValidationResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidQuantity {
            field: field.to_string(),
            value: text.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
