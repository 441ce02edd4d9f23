//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (DB ping)
//!
//! # Auth
//! POST   /api/auth/register             - Register and start a session
//! POST   /api/auth/login                - Login (optional "remember")
//! POST   /api/auth/logout               - End the session (always succeeds)
//! GET    /api/auth/me                   - Full profile of the session user
//! GET    /api/auth/check                - Non-failing session probe
//! POST   /api/auth/avatar               - Upload avatar (multipart, field "avatar")
//! DELETE /api/auth/avatar               - Remove avatar (idempotent)
//!
//! # Catalog
//! GET  /api/products                    - All products
//! GET  /api/products/{id}               - Single product
//! GET  /api/products/category/{id}      - Products in a category
//! GET  /api/products/search/{query}     - Substring search
//! GET  /api/categories                  - Categories with product counts
//!
//! # Reviews
//! GET  /api/reviews/{productId}         - Reviews for a product, newest first
//! POST /api/reviews                     - Submit a review (no login required)
//!
//! # Static
//! GET  /uploads/*                       - Avatar files
//! ```

pub mod auth;
pub mod categories;
pub mod products;
pub mod reviews;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    use axum::extract::DefaultBodyLimit;

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/check", get(auth::check))
        .route(
            "/avatar",
            post(auth::upload_avatar).delete(auth::delete_avatar),
        )
        // Avatar payloads are validated at 5 MiB; leave headroom for the
        // multipart framing around them.
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/category/{id}", get(products::by_category))
        .route("/search/{query}", get(products::search))
}

/// Create the review routes router.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(reviews::create))
        .route("/{product_id}", get(reviews::for_product))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/products", product_routes())
        .route("/api/categories", get(categories::index))
        .nest("/api/reviews", review_routes())
}
