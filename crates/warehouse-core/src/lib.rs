//! # warehouse-core: Domain Types for the Warehouse Inventory
//!
//! Pure data model for articles, products and their composition, plus the
//! quantity parsing rules shared by every layer. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Warehouse Inventory Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 warehouse-api (HTTP adapter)                    │   │
//! │  │   health, inventory, product stock, uploads, sell              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               warehouse-db (inventory engine)                   │   │
//! │  │        transactions, query set, SQLite migrations               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ warehouse-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐   │   │
//! │  │   │    types     │   │  validation  │   │      error       │   │   │
//! │  │   │ StockRecord  │   │ parse_stock  │   │ ValidationError  │   │   │
//! │  │   │ Product      │   │ parse_amount │   │                  │   │   │
//! │  │   └──────────────┘   └──────────────┘   └──────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Articles, products, compositions and upload payloads
//! - [`validation`] - Strict and lenient quantity parsing
//! - [`error`] - Validation error types
//!
//! ## Quantities Are Text On The Wire
//!
//! Upload payloads carry quantities as decimal strings (`"stock": "12"`).
//! They are parsed here, strictly when writing and leniently when reading
//! availability:
//!
//! ```rust
//! use warehouse_core::validation::{lenient_count, parse_stock};
//!
//! assert_eq!(parse_stock("12").unwrap(), 12);
//! assert!(parse_stock("twelve").is_err());
//!
//! // Reads never fail: garbage counts as zero.
//! assert_eq!(lenient_count("twelve"), 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;
