//! Session manager: issues, validates, and revokes opaque session tokens.
//!
//! This is the sole authorization primitive - there is no role or
//! permission model. A token names a row in the `sessions` table; a session
//! is live while `expires_at` lies in the future. Expired rows are inert
//! and are never swept; the expiry check here is the only thing excluding
//! them.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::SqlitePool;

use loftwood_core::{UserId, UserIdentity};

use crate::db::RepositoryError;
use crate::db::sessions::SessionRepository;

/// Session lifetime granted on registration: 7 days.
pub const REGISTER_TTL_DAYS: i64 = 7;
/// Session lifetime for "remember me" logins: 30 days.
pub const REMEMBER_TTL_DAYS: i64 = 30;
/// Default session lifetime for plain logins: 1 day.
pub const DEFAULT_TTL_DAYS: i64 = 1;

/// Number of random bytes per token. 32 bytes gives 256 bits of
/// randomness, comfortably past the 128-bit collision floor.
const TOKEN_BYTES: usize = 32;

/// Session manager over the session repository.
pub struct SessionManager<'a> {
    sessions: SessionRepository<'a>,
}

impl<'a> SessionManager<'a> {
    /// Create a new session manager.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            sessions: SessionRepository::new(pool),
        }
    }

    /// Issue a new session for a user and return the opaque token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user_id: UserId, ttl: Duration) -> Result<String, RepositoryError> {
        let token = generate_token();
        let now = Utc::now();
        self.sessions
            .insert(&token, user_id, now, now + ttl)
            .await?;
        Ok(token)
    }

    /// Validate a token.
    ///
    /// Returns the denormalized identity of the owning user, or `None` if
    /// the session is absent or its expiry has passed. Callers at the HTTP
    /// boundary must clear the client-held cookie on `None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lookup fails.
    pub async fn validate(&self, token: &str) -> Result<Option<UserIdentity>, RepositoryError> {
        let Some((expires_at, identity)) = self.sessions.find_with_user(token).await? else {
            return Ok(None);
        };

        if expires_at <= Utc::now() {
            return Ok(None);
        }

        Ok(Some(identity))
    }

    /// Revoke a token. Idempotent; revoking an unknown token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn revoke(&self, token: &str) -> Result<(), RepositoryError> {
        self.sessions.delete(token).await
    }
}

/// Generate a cryptographically unguessable session token.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
