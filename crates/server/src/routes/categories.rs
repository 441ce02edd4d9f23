//! Category route handlers.

use axum::{Json, extract::State};

use loftwood_core::Category;

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::state::AppState;

/// GET /api/categories
///
/// All categories with their product counts, in insertion order.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = ProductRepository::new(state.pool()).list_categories().await?;
    Ok(Json(categories))
}
