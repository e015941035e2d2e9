//! Tracing/logging initialization.
//!
//! JSON lines on stdout. `RUST_LOG` wins over the configured level.

use tracing::Span;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;

/// Service name attached to the root span.
pub const SERVICE_NAME: &str = "warehouse";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ServiceConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_current_span(true)
        .try_init();
}

/// Span every log line of the process is nested under.
pub fn root_span(config: &ServiceConfig) -> Span {
    tracing::info_span!(
        "service",
        service = SERVICE_NAME,
        release = %config.version,
        environment = %config.environment,
    )
}
