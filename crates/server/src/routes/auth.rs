//! Authentication route handlers.
//!
//! Handles registration, login, logout, the session probe, and avatar
//! management. Successful register/login responses set the session cookie;
//! logout and stale-session paths clear it.

use axum::{
    Json,
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::auth::{CurrentUser, session_token};
use crate::middleware::session::{removal_cookie, session_cookie};
use crate::services::auth::{AuthError, AuthService, Registration};
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Registration request body.
///
/// Every field is optional at the wire level; presence checks live in the
/// auth service so missing and empty fields produce the same message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    #[serde(default)]
    pub subscribe_news: bool,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub remember: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let auth = AuthService::new(state.pool(), state.avatars());

    let (user, session) = auth
        .register(Registration {
            name: body.name,
            phone: body.phone,
            email: body.email,
            password: body.password,
            confirm_password: body.confirm_password,
            subscribe_news: body.subscribe_news,
        })
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    let jar = jar.add(session_cookie(session.token, session.ttl));
    Ok((jar, Json(json!({ "success": true, "user": user }))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let auth = AuthService::new(state.pool(), state.avatars());

    let (user, session) = auth
        .login(body.email.as_deref(), body.password.as_deref(), body.remember)
        .await?;

    tracing::info!(user_id = %user.id, remember = body.remember, "user logged in");

    let jar = jar.add(session_cookie(session.token, session.ttl));
    Ok((jar, Json(json!({ "success": true, "user": user }))))
}

/// POST /api/auth/logout
///
/// Always succeeds, whether or not a live session was presented.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>)> {
    if let Some(token) = session_token(&jar) {
        let auth = AuthService::new(state.pool(), state.avatars());
        auth.logout(&token).await.map_err(AppError::Database)?;
    }

    let jar = jar.add(removal_cookie());
    Ok((jar, Json(json!({ "success": true }))))
}

/// GET /api/auth/me
///
/// A cookie naming a revoked or expired session is cleared alongside the
/// 401, so the browser stops presenting it.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(token) = session_token(&jar) else {
        return AppError::Auth(AuthError::NotAuthenticated).into_response();
    };

    let auth = AuthService::new(state.pool(), state.avatars());
    match auth.current_user(&token).await {
        Ok(user) => Json(json!({ "user": user })).into_response(),
        Err(AuthError::NotAuthenticated) => (
            CookieJar::new().add(removal_cookie()),
            AppError::Auth(AuthError::NotAuthenticated),
        )
            .into_response(),
        Err(e) => AppError::Auth(e).into_response(),
    }
}

/// GET /api/auth/check
///
/// Never fails: a missing, unknown, or expired session answers
/// `{"authenticated": false}`, and a stale cookie is cleared on the way
/// out. Lookup failures are logged and reported as unauthenticated.
pub async fn check(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let token = session_token(&jar);
    let had_cookie = token.is_some();

    let auth = AuthService::new(state.pool(), state.avatars());
    let identity = match auth.check(token.as_deref()).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::error!(error = %e, "session check failed");
            None
        }
    };

    match identity {
        Some(user) => (jar, Json(json!({ "authenticated": true, "user": user }))),
        None => {
            let jar = if had_cookie {
                jar.add(removal_cookie())
            } else {
                jar
            };
            (jar, Json(json!({ "authenticated": false })))
        }
    }
}

/// POST /api/auth/avatar
///
/// Multipart upload; the image arrives in the `avatar` field.
pub async fn upload_avatar(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid upload: {e}")))?
    {
        if field.name() == Some("avatar") {
            let content_type = field.content_type().map(ToOwned::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid upload: {e}")))?;
            upload = Some((content_type, bytes.to_vec()));
        }
    }

    let (content_type, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_owned()))?;

    let auth = AuthService::new(state.pool(), state.avatars());
    let avatar = auth
        .set_avatar(user.id, content_type.as_deref(), &bytes)
        .await?;

    tracing::info!(user_id = %user.id, %avatar, "avatar updated");

    Ok(Json(json!({ "success": true, "avatar": avatar })))
}

/// DELETE /api/auth/avatar
///
/// Idempotent: deleting an absent avatar still succeeds.
pub async fn delete_avatar(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>> {
    let auth = AuthService::new(state.pool(), state.avatars());
    auth.clear_avatar(user.id).await?;

    Ok(Json(json!({ "success": true })))
}
