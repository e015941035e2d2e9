//! # warehouse-db: Store Layer and Inventory Engine
//!
//! SQLite-backed implementation of the warehouse inventory engine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warehouse Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (sell_product)                                           │
//! │       │  RequestContext { request_id, deadline }                       │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  warehouse-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌───────────────┐   ┌──────────────┐    │   │
//! │  │   │ InventoryEngine│   │   queries     │   │  Migrations  │    │   │
//! │  │   │ (inventory.rs) │──►│ (queries.rs)  │   │  (embedded)  │    │   │
//! │  │   │                │   │               │   │              │    │   │
//! │  │   │ one transaction│   │ list_stock    │   │ 001_initial  │    │   │
//! │  │   │ per call       │   │ insert_stock  │   │              │    │   │
//! │  │   └───────┬────────┘   │ decrement ... │   └──────────────┘    │   │
//! │  │           │            └───────────────┘                       │   │
//! │  │           ▼                                                     │   │
//! │  │   ┌────────────────┐                                            │   │
//! │  │   │   Database     │  SqlitePool, shared by every request       │   │
//! │  │   │   (pool.rs)    │                                            │   │
//! │  │   └────────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store and engine error types
//! - [`context`] - Per-call execution context (request id + deadline)
//! - [`queries`] - The parameterized statements the engine issues
//! - [`inventory`] - The transactional inventory engine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use warehouse_db::{Database, DbConfig, InventoryEngine, RequestContext, SqliteInventory};
//!
//! let db = Database::new(DbConfig::new("warehouse.db")).await?;
//! let engine = SqliteInventory::new(db);
//!
//! let ctx = RequestContext::new("req-1", Duration::from_secs(25));
//! engine.sell_product(&ctx, "Dining Chair").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod context;
pub mod error;
pub mod inventory;
pub mod migrations;
pub mod pool;
pub mod queries;

// =============================================================================
// Re-exports
// =============================================================================

pub use context::RequestContext;
pub use error::{DbError, InventoryError, InventoryResult};
pub use inventory::{InventoryEngine, SqliteInventory};
pub use pool::{Database, DbConfig};
