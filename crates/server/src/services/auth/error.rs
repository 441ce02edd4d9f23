//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed, missing, or out-of-range input. Carries the full,
    /// user-facing message (policy violations are collected, not
    /// short-circuited).
    #[error("{0}")]
    Validation(String),

    /// Invalid credentials (wrong password or unknown email).
    ///
    /// Deliberately indistinguishable to avoid account enumeration.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A user with this email already exists.
    #[error("a user with this email already exists")]
    EmailTaken,

    /// No valid session (missing, unknown, or expired token).
    #[error("session expired")]
    NotAuthenticated,

    /// Session references a user that no longer resolves.
    #[error("user not found")]
    UserNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Avatar blob storage error.
    #[error("avatar storage error: {0}")]
    Storage(#[from] std::io::Error),
}
