//! # Warehouse API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warehouse API Server                             │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► Handlers ───► InventoryEngine ───► SQLite │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, Instrument};

use warehouse_api::{telemetry, AppState, ServiceConfig};
use warehouse_db::{Database, SqliteInventory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::load()?;

    // Initialize tracing
    telemetry::init(&config);
    let root_span = telemetry::root_span(&config);

    serve(config, root_span.clone()).instrument(root_span).await
}

async fn serve(config: ServiceConfig, root_span: tracing::Span) -> anyhow::Result<()> {
    info!("Starting Warehouse API server...");
    info!(
        addr = %config.listen_address,
        database = %config.database_path.display(),
        timeout_secs = config.backend_timeout.as_secs(),
        "Configuration loaded"
    );

    // Connect to database (runs migrations)
    let db = Database::new(config.db_config())
        .await
        .context("failed to open database")?;
    info!("Database ready");

    let engine = Arc::new(SqliteInventory::new(db.clone()));
    let state = AppState::new(engine, config.backend_timeout).with_root_span(root_span);
    let app = warehouse_api::router(state);

    let listener = TcpListener::bind(config.listen_address)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_address))?;
    info!(addr = %config.listen_address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(err = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(err = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
