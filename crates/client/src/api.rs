//! Typed HTTP client for the Loftwood API.
//!
//! Wraps a cookie-keeping `reqwest::Client`, so the session established by
//! register or login rides along on every later call, exactly like a
//! browser would carry it.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use loftwood_core::{Category, Product, PublicUser, Review, UserIdentity};

/// Errors returned by [`ApiClient`] calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("{message}")]
    Server {
        /// HTTP status of the failing response.
        status: StatusCode,
        /// The `error` field of the JSON body.
        message: String,
    },
}

impl ApiError {
    /// HTTP status of a server-reported error, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Request(_) => None,
        }
    }
}

/// The `{"error": "..."}` envelope failing endpoints answer with.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserIdentity,
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    user: PublicUser,
}

#[derive(Debug, Deserialize)]
struct CheckEnvelope {
    authenticated: bool,
    user: Option<UserIdentity>,
}

#[derive(Debug, Deserialize)]
struct ReviewEnvelope {
    review: Review,
}

#[derive(Debug, Deserialize)]
struct AvatarEnvelope {
    avatar: String,
}

/// Registration payload.
#[derive(Debug, Default, Clone)]
pub struct RegisterPayload {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub subscribe_news: bool,
}

/// Review submission payload.
#[derive(Debug, Clone)]
pub struct ReviewPayload {
    pub product_id: i64,
    pub name: String,
    pub email: String,
    pub rating: i64,
    pub text: String,
}

/// Typed client for the Loftwood API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against a server base URL, e.g.
    /// `http://localhost:3001`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` if the underlying client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Deserialize a successful response, or surface the server's error
    /// envelope.
    async fn handle<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("server returned {status}"),
        };

        Err(ApiError::Server { status, message })
    }

    // -- Auth ---------------------------------------------------------------

    /// Register a new account; the session cookie is stored on success.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` with the validation message on 400, or
    /// `ApiError::Request` on transport failure.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<UserIdentity, ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({
                "name": payload.name,
                "phone": payload.phone,
                "email": payload.email,
                "password": payload.password,
                "confirmPassword": payload.confirm_password,
                "subscribeNews": payload.subscribe_news,
            }))
            .send()
            .await?;

        Ok(Self::handle::<UserEnvelope>(response).await?.user)
    }

    /// Login; the session cookie is stored on success.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` on bad credentials, `ApiError::Request`
    /// on transport failure.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<UserIdentity, ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({
                "email": email,
                "password": password,
                "remember": remember,
            }))
            .send()
            .await?;

        Ok(Self::handle::<UserEnvelope>(response).await?.user)
    }

    /// End the current session. Succeeds whether or not one exists.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .send()
            .await?;

        Self::handle::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Fetch the full profile of the session user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` with status 401 when no live session is
    /// held.
    pub async fn me(&self) -> Result<PublicUser, ApiError> {
        let response = self.client.get(self.url("/api/auth/me")).send().await?;
        Ok(Self::handle::<ProfileEnvelope>(response).await?.user)
    }

    /// Probe the session. Answers `None` when unauthenticated instead of
    /// erroring.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn check(&self) -> Result<Option<UserIdentity>, ApiError> {
        let response = self.client.get(self.url("/api/auth/check")).send().await?;
        let envelope = Self::handle::<CheckEnvelope>(response).await?;

        Ok(if envelope.authenticated {
            envelope.user
        } else {
            None
        })
    }

    /// Upload an avatar image; returns its public path.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` for unsupported types, oversized
    /// payloads, or a missing session.
    pub async fn upload_avatar(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str(content_type)
            .map_err(|_| ApiError::Server {
                status: StatusCode::BAD_REQUEST,
                message: format!("invalid content type: {content_type}"),
            })?;
        let form = reqwest::multipart::Form::new().part("avatar", part);

        let response = self
            .client
            .post(self.url("/api/auth/avatar"))
            .multipart(form)
            .send()
            .await?;

        Ok(Self::handle::<AvatarEnvelope>(response).await?.avatar)
    }

    /// Remove the current avatar. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` when no live session is held.
    pub async fn delete_avatar(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url("/api/auth/avatar"))
            .send()
            .await?;

        Self::handle::<serde_json::Value>(response).await?;
        Ok(())
    }

    // -- Catalog ------------------------------------------------------------

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.client.get(self.url("/api/products")).send().await?;
        Self::handle(response).await
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` with status 404 for an unknown ID.
    pub async fn product(&self, id: i64) -> Result<Product, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/products/{id}")))
            .send()
            .await?;
        Self::handle(response).await
    }

    /// Fetch the products in a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn products_by_category(&self, category_id: i64) -> Result<Vec<Product>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/products/category/{category_id}")))
            .send()
            .await?;
        Self::handle(response).await
    }

    /// Substring search over product titles and descriptions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/products/search/{query}")))
            .send()
            .await?;
        Self::handle(response).await
    }

    /// Fetch all categories with product counts.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.client.get(self.url("/api/categories")).send().await?;
        Self::handle(response).await
    }

    // -- Reviews ------------------------------------------------------------

    /// Fetch the reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn reviews(&self, product_id: i64) -> Result<Vec<Review>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/reviews/{product_id}")))
            .send()
            .await?;
        Self::handle(response).await
    }

    /// Submit a review.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` for validation failures or an unknown
    /// product.
    pub async fn add_review(&self, payload: &ReviewPayload) -> Result<Review, ApiError> {
        let response = self
            .client
            .post(self.url("/api/reviews"))
            .json(&json!({
                "productId": payload.product_id,
                "name": payload.name,
                "email": payload.email,
                "rating": payload.rating,
                "text": payload.text,
            }))
            .send()
            .await?;

        Ok(Self::handle::<ReviewEnvelope>(response).await?.review)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3001/").unwrap();
        assert_eq!(client.url("/api/products"), "http://localhost:3001/api/products");
    }
}
