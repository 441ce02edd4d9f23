//! Database operations for the storefront SQLite store.
//!
//! # Tables
//!
//! - `users` - Account records (salted password hash, avatar reference)
//! - `sessions` - Opaque session tokens with explicit expiry
//! - `categories` / `products` / `product_images` - Read-only catalog,
//!   owned by an external catalog-management process
//! - `reviews` - Append-only product reviews
//!
//! The schema lives in `schema.sql` and is applied idempotently by
//! [`migrate`] at startup.
//!
//! All timestamps are stored as RFC 3339 text written by the server;
//! repositories parse them back and surface malformed values as
//! [`RepositoryError::DataCorruption`].

pub mod products;
pub mod reviews;
pub mod sessions;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

/// Errors from the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Schema applied at startup.
const SCHEMA: &str = include_str!("schema.sql");

/// Create a SQLite connection pool with sensible defaults.
///
/// The database file is created if it does not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // In-memory databases exist per connection; cap the pool at one
    // connection so every query sees the same database.
    let max_connections = if database_url.contains(":memory:") {
        1
    } else {
        5
    };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply the schema. Idempotent; safe to run on every startup.
///
/// # Errors
///
/// Returns `sqlx::Error` if a statement fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Parse an RFC 3339 timestamp column.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid timestamp {raw:?}: {e}")))
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    migrate(&pool).await.expect("failed to apply schema");
    pool
}
