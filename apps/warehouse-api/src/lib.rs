//! # Warehouse API
//!
//! HTTP adapter over the inventory engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Warehouse API Layers                            │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  middleware    │  │  routes        │  │  error                     ││
//! │  │                │  │                │  │                            ││
//! │  │ • request id   │─►│ • health       │─►│ • InventoryError → status  ││
//! │  │ • deadline     │  │ • inventory    │  │ • JSON rejection → 400     ││
//! │  │ • request span │  │ • product/sell │  │ • {"code", "message"}      ││
//! │  └────────────────┘  └───────┬────────┘  └────────────────────────────┘│
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState { engine: Arc<dyn InventoryEngine>, backend_timeout }  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `WAREHOUSE_LISTEN_ADDRESS` - HTTP bind address (default: 0.0.0.0:8080)
//! - `WAREHOUSE_BACKEND_TIMEOUT_SECS` - Per-request deadline (default: 25)
//! - `WAREHOUSE_DATABASE_PATH` - SQLite file (default: warehouse.db)
//! - `WAREHOUSE_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `WAREHOUSE_LOG_LEVEL` - Log filter when RUST_LOG is unset (default: info)
//! - `WAREHOUSE_VERSION` - Release tag in logs (default: crate version)
//! - `WAREHOUSE_ENVIRONMENT` - Environment tag in logs (default: development)

pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-exports
pub use config::{ConfigError, ServiceConfig};
pub use error::{ApiError, ErrorCode};
pub use routes::router;
pub use state::AppState;
