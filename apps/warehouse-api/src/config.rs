//! Warehouse API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use warehouse_db::DbConfig;

/// Warehouse API configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP bind address
    pub listen_address: SocketAddr,

    /// Deadline for each request's engine call
    pub backend_timeout: Duration,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Default log filter when RUST_LOG is unset
    pub log_level: String,

    /// Release tag attached to every log line
    pub version: String,

    /// Environment tag attached to every log line
    pub environment: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = ServiceConfig {
            listen_address: var("WAREHOUSE_LISTEN_ADDRESS", "0.0.0.0:8080")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WAREHOUSE_LISTEN_ADDRESS".to_string()))?,

            backend_timeout: Duration::from_secs(positive(
                "WAREHOUSE_BACKEND_TIMEOUT_SECS",
                &var("WAREHOUSE_BACKEND_TIMEOUT_SECS", "25"),
            )?),

            database_path: PathBuf::from(var("WAREHOUSE_DATABASE_PATH", "warehouse.db")),

            db_max_connections: positive(
                "WAREHOUSE_DB_MAX_CONNECTIONS",
                &var("WAREHOUSE_DB_MAX_CONNECTIONS", "5"),
            )?,

            log_level: var("WAREHOUSE_LOG_LEVEL", "info"),

            version: var("WAREHOUSE_VERSION", env!("CARGO_PKG_VERSION")),

            environment: var("WAREHOUSE_ENVIRONMENT", "development"),
        };

        if config.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired(
                "WAREHOUSE_DATABASE_PATH".to_string(),
            ));
        }

        Ok(config)
    }

    /// Store settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

/// Parses a strictly positive integer setting.
fn positive<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
