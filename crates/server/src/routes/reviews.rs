//! Review route handlers.
//!
//! Reviews are open to anyone; no session is required to read or submit.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use loftwood_core::{MAX_RATING, MIN_RATING, ProductId, Review};

use crate::db::products::ProductRepository;
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Review submission body.
///
/// Fields are optional at the wire level so missing and empty values fail
/// the same presence check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub rating: Option<i64>,
    pub text: Option<String>,
}

/// GET /api/reviews/{product_id}
///
/// Newest first. An unknown product yields an empty list.
pub async fn for_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool())
        .list_by_product(ProductId::new(product_id))
        .await?;

    Ok(Json(reviews))
}

/// POST /api/reviews
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<Json<Value>> {
    let (product_id, name, email, rating, text) = match (
        body.product_id,
        non_empty(body.name.as_deref()),
        non_empty(body.email.as_deref()),
        body.rating,
        non_empty(body.text.as_deref()),
    ) {
        (Some(product_id), Some(name), Some(email), Some(rating), Some(text)) => {
            (product_id, name, email, rating, text)
        }
        _ => return Err(AppError::BadRequest("Fill in all fields".to_owned())),
    };

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_owned(),
        ));
    }

    let product_id = ProductId::new(product_id);
    let products = ProductRepository::new(state.pool());
    if !products.exists(product_id).await? {
        return Err(AppError::NotFound("Product not found".to_owned()));
    }

    let review = ReviewRepository::new(state.pool())
        .insert(product_id, name, email, rating, text)
        .await?;

    tracing::info!(%product_id, review_id = %review.id, "review submitted");

    Ok(Json(json!({ "success": true, "review": review })))
}

/// Treat empty and whitespace-only strings as missing.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
