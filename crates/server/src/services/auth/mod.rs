//! Authentication service.
//!
//! Orchestrates registration, login, logout and avatar management over the
//! user repository and the session manager.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Duration;
use sqlx::SqlitePool;

use loftwood_core::{Email, PublicUser, UserId, UserIdentity};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::services::avatars::AvatarStore;
use crate::services::session::{
    DEFAULT_TTL_DAYS, REGISTER_TTL_DAYS, REMEMBER_TTL_DAYS, SessionManager,
};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum accepted avatar payload: 5 MiB.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Accepted avatar content types and the file extension each is stored with.
const ALLOWED_AVATAR_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Registration input. Required fields arrive as `Option` so that presence
/// is validated here, in one place, rather than at deserialization.
#[derive(Debug, Default)]
pub struct Registration {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub subscribe_news: bool,
}

/// A freshly issued session: the opaque token and the lifetime it was
/// created with, so the HTTP boundary can set the cookie's max-age to match.
#[derive(Debug)]
pub struct IssuedSession {
    pub token: String,
    pub ttl: Duration,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    sessions: SessionManager<'a>,
    avatars: &'a AvatarStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, avatars: &'a AvatarStore) -> Self {
        Self {
            users: UserRepository::new(pool),
            sessions: SessionManager::new(pool),
            avatars,
        }
    }

    /// Register a new user and immediately issue a 7-day session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if required fields are missing, the
    /// passwords do not match, or the password fails policy (all violations
    /// reported together). Returns `AuthError::EmailTaken` if the email is
    /// already registered.
    pub async fn register(
        &self,
        registration: Registration,
    ) -> Result<(UserIdentity, IssuedSession), AuthError> {
        let (name, email, password, confirm_password) = match (
            non_empty(registration.name.as_deref()),
            non_empty(registration.email.as_deref()),
            non_empty(registration.password.as_deref()),
            non_empty(registration.confirm_password.as_deref()),
        ) {
            (Some(name), Some(email), Some(password), Some(confirm)) => {
                (name, email, password, confirm)
            }
            _ => {
                return Err(AuthError::Validation(
                    "Fill in all required fields".to_owned(),
                ));
            }
        };

        if password != confirm_password {
            return Err(AuthError::Validation("Passwords do not match".to_owned()));
        }

        let violations = validate_password(password);
        if !violations.is_empty() {
            return Err(AuthError::Validation(violations.join(". ")));
        }

        let email = Email::parse(email)
            .map_err(|_| AuthError::Validation("Invalid email address".to_owned()))?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(
                name,
                non_empty(registration.phone.as_deref()),
                &email,
                &password_hash,
                registration.subscribe_news,
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        let ttl = Duration::days(REGISTER_TTL_DAYS);
        let token = self.sessions.create(user.id, ttl).await?;

        Ok((user.identity(), IssuedSession { token, ttl }))
    }

    /// Login with email and password.
    ///
    /// The session lasts 30 days when `remember` is set, 1 day otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if either field is missing, and the
    /// generic `AuthError::InvalidCredentials` whether the email is unknown
    /// or the password wrong.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        remember: bool,
    ) -> Result<(UserIdentity, IssuedSession), AuthError> {
        let (Some(email), Some(password)) = (non_empty(email), non_empty(password)) else {
            return Err(AuthError::Validation("Enter email and password".to_owned()));
        };

        // An unparseable email cannot match any stored user; fall through to
        // the same generic failure as an unknown one.
        let user = match Email::parse(email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };
        let user = user.ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        let ttl = if remember {
            Duration::days(REMEMBER_TTL_DAYS)
        } else {
            Duration::days(DEFAULT_TTL_DAYS)
        };
        let token = self.sessions.create(user.id, ttl).await?;

        Ok((user.identity(), IssuedSession { token, ttl }))
    }

    /// Revoke the session named by the caller's cookie. Always succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete itself fails.
    pub async fn logout(&self, token: &str) -> Result<(), RepositoryError> {
        self.sessions.revoke(token).await
    }

    /// Resolve the full public projection for the session's user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if the session is absent or
    /// expired.
    pub async fn current_user(&self, token: &str) -> Result<PublicUser, AuthError> {
        let identity = self
            .sessions
            .validate(token)
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        let user = self
            .users
            .find_by_id(identity.id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.public())
    }

    /// Non-failing session check: `Some(identity)` for a live session,
    /// `None` for a missing, unknown, or expired one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` only if the lookup itself fails;
    /// the HTTP boundary still answers unauthenticated in that case.
    pub async fn check(&self, token: Option<&str>) -> Result<Option<UserIdentity>, RepositoryError> {
        match token {
            Some(token) => self.sessions.validate(token).await,
            None => Ok(None),
        }
    }

    /// Store a new avatar for the user and return its public reference.
    ///
    /// The new blob is written and recorded before the old one is removed,
    /// so a failure never leaves the user without an avatar. Old-blob
    /// removal is best-effort.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for an unsupported content type or
    /// an oversized payload, `AuthError::Storage` for disk failures.
    pub async fn set_avatar(
        &self,
        user_id: UserId,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, AuthError> {
        let extension = content_type
            .and_then(|ct| {
                ALLOWED_AVATAR_TYPES
                    .iter()
                    .find(|(mime, _)| *mime == ct)
                    .map(|(_, ext)| *ext)
            })
            .ok_or_else(|| {
                AuthError::Validation("Only images are allowed (JPEG, PNG, GIF, WebP)".to_owned())
            })?;

        if bytes.is_empty() {
            return Err(AuthError::Validation("No file uploaded".to_owned()));
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(AuthError::Validation(
                "Image must be at most 5 MB".to_owned(),
            ));
        }

        let old = self.users.avatar(user_id).await?;

        let reference = self.avatars.store(user_id, extension, bytes).await?;
        self.users.set_avatar(user_id, &reference).await?;

        if let Some(old) = old {
            self.avatars.remove(&old).await;
        }

        Ok(reference)
    }

    /// Remove the user's avatar. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the row update fails.
    pub async fn clear_avatar(&self, user_id: UserId) -> Result<(), AuthError> {
        let old = self.users.avatar(user_id).await?;

        if let Some(old) = old {
            self.users.clear_avatar(user_id).await?;
            self.avatars.remove(&old).await;
        }

        Ok(())
    }
}

/// Treat empty and whitespace-only strings as missing.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validate the password policy, collecting every violation.
fn validate_password(password: &str) -> Vec<String> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
    if !password.chars().any(is_letter) {
        violations.push("Password must contain at least one letter".to_owned());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain at least one digit".to_owned());
    }

    violations
}

/// A letter for policy purposes: Latin or Cyrillic.
fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('А'..='я').contains(&c)
}

/// Hash a password using Argon2id with a generated salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
