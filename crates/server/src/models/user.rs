//! User domain type.

use chrono::{DateTime, Utc};

use loftwood_core::{Email, PublicUser, UserId, UserIdentity};

/// A storefront user (domain type).
///
/// The full row including the password hash; never serialized directly.
/// Clients only ever see the projections produced by [`User::identity`]
/// and [`User::public`].
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Email address (unique, stored case-sensitively).
    pub email: Email,
    /// Argon2 password hash.
    pub password_hash: String,
    /// Newsletter opt-in.
    pub subscribe_news: bool,
    /// Relative path of the stored avatar, if any.
    pub avatar: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The session-join projection returned by login, registration and the
    /// session check.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.as_str().to_owned(),
            phone: self.phone.clone(),
        }
    }

    /// The full public projection returned by `/auth/me`.
    #[must_use]
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.as_str().to_owned(),
            phone: self.phone.clone(),
            avatar: self.avatar.clone(),
            subscribe_news: self.subscribe_news,
            created_at: self.created_at,
        }
    }
}
