//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use loftwood_core::{Product, ProductId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// GET /api/products
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .find_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// GET /api/products/category/{id}
///
/// An unknown category is not an error; it simply has no products.
pub async fn by_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .list_by_category(loftwood_core::CategoryId::new(id))
        .await?;

    Ok(Json(products))
}

/// GET /api/products/search/{query}
///
/// Case-insensitive substring match over title and description.
pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).search(&query).await?;
    Ok(Json(products))
}
