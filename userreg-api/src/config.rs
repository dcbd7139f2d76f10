//! Configuration management for the API server
//!
//! This module loads configuration from environment variables and provides
//! a type-safe configuration struct.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to (default: 8080)
//! - `STORE_BACKEND`: `postgres` or `memory` (default: postgres)
//! - `USERS_TABLE`: Users table name (default: users-dev)
//! - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
//! - `RUST_LOG`: Log filter
//!
//! # Example
//!
//! ```no_run
//! use userreg_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use userreg_shared::store::postgres::is_valid_table_name;

/// Default table name, matching the development deployment
pub const DEFAULT_USERS_TABLE: &str = "users-dev";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// User store configuration
    pub store: StoreConfig,

    /// Log output format
    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// User store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which backend holds user records
    pub backend: StoreBackend,

    /// Table name (PostgreSQL backend)
    pub users_table: String,

    /// Database settings, present only for the PostgreSQL backend
    pub database: Option<DatabaseConfig>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via sqlx
    Postgres,

    /// Process-local, non-persistent
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("Unknown STORE_BACKEND '{}': expected postgres or memory", other),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,

    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("Unknown LOG_FORMAT '{}': expected pretty or json", other),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A variable has an unparseable value
    /// - `USERS_TABLE` is not a valid table name
    /// - `DATABASE_URL` is missing while the PostgreSQL backend is selected
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("Invalid API_PORT: {}", e))?;

        let backend = lookup("STORE_BACKEND")
            .map(|v| v.parse::<StoreBackend>())
            .transpose()?
            .unwrap_or(StoreBackend::Postgres);

        let users_table =
            lookup("USERS_TABLE").unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string());
        if !is_valid_table_name(&users_table) {
            anyhow::bail!(
                "USERS_TABLE '{}' must be 1-48 characters of letters, digits, '_', '.' or '-'",
                users_table
            );
        }

        let database = match backend {
            StoreBackend::Postgres => {
                let url = lookup("DATABASE_URL").ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL environment variable is required")
                })?;
                let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse::<u32>()
                    .map_err(|e| anyhow::anyhow!("Invalid DATABASE_MAX_CONNECTIONS: {}", e))?;
                Some(DatabaseConfig {
                    url,
                    max_connections,
                })
            }
            StoreBackend::Memory => None,
        };

        let log_format = lookup("LOG_FORMAT")
            .map(|v| v.parse::<LogFormat>())
            .transpose()?
            .unwrap_or(LogFormat::Pretty);

        Ok(Self {
            api: ApiConfig { host, port },
            store: StoreConfig {
                backend,
                users_table,
                database,
            },
            log_format,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
