//! User-facing projections of the account record.
//!
//! The password hash never leaves the server; these are the only shapes a
//! client ever sees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// The identity carried by a validated session.
///
/// This is the projection joined out of the session lookup and returned by
/// login, registration and the session check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// User's database ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// The full public projection of a user, as returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// User's database ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Relative path of the stored avatar, if any.
    pub avatar: Option<String>,
    /// Whether the user opted into the newsletter.
    pub subscribe_news: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
