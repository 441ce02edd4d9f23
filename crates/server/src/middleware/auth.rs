//! Authentication extractor.
//!
//! Route handlers that need a logged-in user take [`CurrentUser`] as an
//! argument; the extractor reads the session cookie, validates it against
//! the sessions table, and rejects with a JSON error otherwise. A rejection
//! for a stale cookie also instructs the browser to drop it.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use loftwood_core::UserIdentity;

use crate::middleware::session::removal_cookie;
use crate::models::SESSION_COOKIE_NAME;
use crate::services::session::SessionManager;
use crate::state::AppState;

/// Extractor that requires a live session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct CurrentUser(pub UserIdentity);

/// Rejection returned when no live session backs the request.
pub enum AuthRejection {
    /// No session cookie at all.
    MissingCookie,
    /// A cookie was presented but names no live session; the response
    /// clears it so the browser stops sending it.
    StaleCookie,
    /// The session lookup itself failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::MissingCookie => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Authorization required" })),
            )
                .into_response(),
            Self::StaleCookie => (
                StatusCode::UNAUTHORIZED,
                CookieJar::new().add(removal_cookie()),
                Json(json!({ "error": "Session expired" })),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server error" })),
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned())
            .ok_or(AuthRejection::MissingCookie)?;

        let identity = SessionManager::new(state.pool())
            .validate(&token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session validation failed");
                AuthRejection::Internal
            })?
            .ok_or(AuthRejection::StaleCookie)?;

        Ok(Self(identity))
    }
}

/// Read the raw session token from the request cookies, if present.
///
/// Used by endpoints that must not fail on an absent or stale session,
/// such as logout and the session check.
#[must_use]
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}
