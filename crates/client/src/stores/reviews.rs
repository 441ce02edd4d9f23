//! Per-product review cache.
//!
//! Keeps the reviews the UI has already fetched, newest first, and
//! prepends a freshly submitted review so it appears immediately without a
//! refetch.

use std::collections::HashMap;

use loftwood_core::{ProductId, Review};

use crate::api::{ApiClient, ApiError, ReviewPayload};

/// Cached reviews, keyed by product.
#[derive(Debug, Default)]
pub struct ReviewsStore {
    by_product: HashMap<ProductId, Vec<Review>>,
}

impl ReviewsStore {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached reviews for a product; empty when never fetched.
    #[must_use]
    pub fn reviews_for(&self, product_id: ProductId) -> &[Review] {
        self.by_product
            .get(&product_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Fetch a product's reviews and replace the cached list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure; the cache keeps
    /// its previous contents.
    pub async fn load(&mut self, api: &ApiClient, product_id: ProductId) -> Result<(), ApiError> {
        let reviews = api.reviews(product_id.as_i64()).await?;
        self.by_product.insert(product_id, reviews);
        Ok(())
    }

    /// Submit a review and prepend it to the cached list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` for validation failures or an unknown
    /// product; the cache is untouched.
    pub async fn add(&mut self, api: &ApiClient, payload: &ReviewPayload) -> Result<(), ApiError> {
        let review = api.add_review(payload).await?;
        self.insert(review);
        Ok(())
    }

    /// Prepend a review to its product's cached list.
    pub fn insert(&mut self, review: Review) {
        self.by_product
            .entry(review.product_id)
            .or_default()
            .insert(0, review);
    }
}
