//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and have development defaults:
//! - `LOFTWOOD_DATABASE_URL` - SQLite connection string
//!   (fallback: `DATABASE_URL`, default: `sqlite://loftwood.db?mode=rwc`)
//! - `LOFTWOOD_HOST` - Bind address (default: 127.0.0.1)
//! - `LOFTWOOD_PORT` - Listen port (default: 3001)
//! - `LOFTWOOD_UPLOADS_DIR` - Directory for uploaded avatars (default: `uploads`)
//! - `LOFTWOOD_CORS_ORIGIN` - Browser client origin allowed to send
//!   credentialed requests (default: none, CORS disabled)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database connection URL.
    pub database_url: String,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Directory where uploaded avatar files are stored.
    pub uploads_dir: PathBuf,
    /// Origin allowed to make credentialed cross-origin requests, if any.
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url();
        let host = get_env_or_default("LOFTWOOD_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("LOFTWOOD_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("LOFTWOOD_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("LOFTWOOD_PORT".to_string(), e.to_string()))?;
        let uploads_dir = PathBuf::from(get_env_or_default("LOFTWOOD_UPLOADS_DIR", "uploads"));
        let cors_origin = get_optional_env("LOFTWOOD_CORS_ORIGIN");

        Ok(Self {
            database_url,
            host,
            port,
            uploads_dir,
            cors_origin,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url() -> String {
    if let Ok(value) = std::env::var("LOFTWOOD_DATABASE_URL") {
        return value;
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return value;
    }
    "sqlite://loftwood.db?mode=rwc".to_string()
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
