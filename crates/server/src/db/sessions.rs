//! Session repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use loftwood_core::{UserId, UserIdentity};

use super::{RepositoryError, parse_timestamp};

/// Session row joined with the owning user's identity fields.
#[derive(Debug, sqlx::FromRow)]
struct SessionUserRow {
    expires_at: String,
    user_id: i64,
    name: String,
    email: String,
    phone: Option<String>,
}

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new session row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        id: &str,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(id)
        .bind(user_id.as_i64())
        .bind(created_at.to_rfc3339())
        .bind(expires_at.to_rfc3339())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Look up a session joined with its owning user.
    ///
    /// Returns the stored expiry and the denormalized identity; the caller
    /// decides whether the session is still live. Every session row
    /// references an existing user, so the join cannot drop rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn find_with_user(
        &self,
        id: &str,
    ) -> Result<Option<(DateTime<Utc>, UserIdentity)>, RepositoryError> {
        let row: Option<SessionUserRow> = sqlx::query_as(
            r"
            SELECT s.expires_at, u.id AS user_id, u.name, u.email, u.phone
            FROM sessions s
            INNER JOIN users u ON s.user_id = u.id
            WHERE s.id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let expires_at = parse_timestamp(&row.expires_at)?;
        let identity = UserIdentity {
            id: UserId::new(row.user_id),
            name: row.name,
            email: row.email,
            phone: row.phone,
        };

        Ok(Some((expires_at, identity)))
    }

    /// Delete a session row. Idempotent; deleting an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
