//! User repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use loftwood_core::{Email, UserId};

use super::{RepositoryError, parse_timestamp};
use crate::models::user::User;

/// Raw user row as stored in SQLite.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    phone: Option<String>,
    email: String,
    password_hash: String,
    subscribe_news: bool,
    avatar: Option<String>,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            phone: self.phone,
            email,
            password_hash: self.password_hash,
            subscribe_news: self.subscribe_news,
            avatar: self.avatar,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        phone: Option<&str>,
        email: &Email,
        password_hash: &str,
        subscribe_news: bool,
    ) -> Result<User, RepositoryError> {
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (name, phone, email, password_hash, subscribe_news, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(phone)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(subscribe_news)
        .bind(created_at.to_rfc3339())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(User {
            id: UserId::new(id),
            name: name.to_owned(),
            phone: phone.map(str::to_owned),
            email: email.clone(),
            password_hash: password_hash.to_owned(),
            subscribe_news,
            avatar: None,
            created_at,
        })
    }

    /// Get a user by their email address. Exact match, case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, phone, email, password_hash, subscribe_news, avatar, created_at
            FROM users
            WHERE email = ?1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, phone, email, password_hash, subscribe_news, avatar, created_at
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user's current avatar reference.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn avatar(&self, id: UserId) -> Result<Option<String>, RepositoryError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT avatar FROM users WHERE id = ?1")
                .bind(id.as_i64())
                .fetch_optional(self.pool)
                .await?;

        row.map(|(avatar,)| avatar).ok_or(RepositoryError::NotFound)
    }

    /// Record a new avatar reference on the user row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_avatar(&self, id: UserId, avatar: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET avatar = ?1 WHERE id = ?2")
            .bind(avatar)
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Null the avatar reference. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn clear_avatar(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET avatar = NULL WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
