//! Client-side mirror of the server auth state.
//!
//! The session itself lives in the cookie jar inside [`ApiClient`]; this
//! store mirrors who is logged in so the UI can render without a round
//! trip, and records the last auth error for the forms to display.

use loftwood_core::{PublicUser, UserIdentity};

use crate::api::{ApiClient, ApiError, RegisterPayload};

/// Mirrored authentication state.
#[derive(Debug, Default)]
pub struct AuthStore {
    user: Option<UserIdentity>,
    profile: Option<PublicUser>,
    last_error: Option<String>,
}

impl AuthStore {
    /// Create an empty, unauthenticated store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The logged-in user's identity, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// The full profile, once fetched via [`Self::fetch_profile`].
    #[must_use]
    pub const fn profile(&self) -> Option<&PublicUser> {
        self.profile.as_ref()
    }

    /// Whether a user is currently mirrored as logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The last auth error message, cleared by the next successful call.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Probe the server session and mirror the answer.
    ///
    /// Transport failures leave the current state untouched; an
    /// unauthenticated answer clears it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn check(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        match api.check().await {
            Ok(Some(user)) => {
                self.user = Some(user);
                self.last_error = None;
                Ok(())
            }
            Ok(None) => {
                self.reset();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Register and mirror the new session.
    ///
    /// # Errors
    ///
    /// Returns the server's validation error; the message is also kept in
    /// [`Self::last_error`].
    pub async fn register(
        &mut self,
        api: &ApiClient,
        payload: &RegisterPayload,
    ) -> Result<(), ApiError> {
        match api.register(payload).await {
            Ok(user) => {
                self.user = Some(user);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Login and mirror the new session.
    ///
    /// # Errors
    ///
    /// Returns the server's error; the message is also kept in
    /// [`Self::last_error`].
    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<(), ApiError> {
        match api.login(email, password, remember).await {
            Ok(user) => {
                self.user = Some(user);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Logout and clear the mirrored state.
    ///
    /// The local state is cleared even if the server call fails; the
    /// cookie is gone either way as far as the UI is concerned.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn logout(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let result = api.logout().await;
        self.reset();
        result
    }

    /// Fetch and mirror the full profile of the session user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` with status 401 when the session has
    /// lapsed; the mirrored state is cleared in that case.
    pub async fn fetch_profile(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        match api.me().await {
            Ok(profile) => {
                self.user = Some(UserIdentity {
                    id: profile.id,
                    name: profile.name.clone(),
                    email: profile.email.clone(),
                    phone: profile.phone.clone(),
                });
                self.profile = Some(profile);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                if e.status() == Some(reqwest::StatusCode::UNAUTHORIZED) {
                    self.reset();
                }
                self.record_error(&e);
                Err(e)
            }
        }
    }

    fn record_error(&mut self, error: &ApiError) {
        self.last_error = Some(error.to_string());
    }

    fn reset(&mut self) {
        self.user = None;
        self.profile = None;
        self.last_error = None;
    }
}
