//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `STORE_BACKEND`: `memory` or `postgres` (default: "memory")
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `SLOT_MINUTES`: Length of a bookable slot (default: 30)
//! - `SEED_DEFAULT_DATA`: Load sample records into the memory store (default: false)
//! - `ADMIN_EMAIL` / `ADMIN_PASSWORD`: Bootstrap admin account, created if absent

use eyre::{eyre, Result, WrapErr};
use slotbook_core::slots::DEFAULT_SLOT_MINUTES;
use std::env;
use tracing::Level;

/// Which [`RecordStore`](slotbook_core::store::RecordStore) backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

/// Credentials of the administrator account created at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Storage backend selection
    pub store_backend: StoreBackend,

    /// PostgreSQL connection string, present whenever the backend is `Postgres`
    pub database_url: Option<String>,

    /// Slot length in minutes, always greater than zero
    pub slot_minutes: u16,

    /// Whether the memory store starts with sample data
    pub seed_default_data: bool,

    /// Administrator to create at startup, if configured
    pub admin: Option<AdminCredentials>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - Configuration object or error
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `STORE_BACKEND` is `postgres` and `DATABASE_URL` is not set
    /// - `STORE_BACKEND` names an unknown backend
    /// - The API_PORT value cannot be parsed as a u16
    /// - `SLOT_MINUTES` is not a positive number
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        // Storage settings
        let store_backend = match lookup("STORE_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres,
            other => return Err(eyre!("Unknown STORE_BACKEND '{}'", other)),
        };
        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(eyre!(
                "DATABASE_URL environment variable must be set for the postgres backend"
            ));
        }
        let seed_default_data = lookup("SEED_DEFAULT_DATA")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        // Booking settings
        let slot_minutes: u16 = match lookup("SLOT_MINUTES") {
            Some(v) => v.parse().wrap_err("Invalid SLOT_MINUTES value")?,
            None => DEFAULT_SLOT_MINUTES,
        };
        if slot_minutes == 0 {
            return Err(eyre!("SLOT_MINUTES must be greater than zero"));
        }

        // Bootstrap admin
        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminCredentials { email, password }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            store_backend,
            database_url,
            slot_minutes,
            seed_default_data,
            admin,
        })
    }

    /// Returns the server address as a string
    ///
    /// # Returns
    ///
    /// * `String` - Formatted server address (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
