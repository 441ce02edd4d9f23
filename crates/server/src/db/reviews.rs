//! Review repository: append-only collection keyed by product id.

use chrono::Utc;
use sqlx::SqlitePool;

use loftwood_core::{ProductId, Review, ReviewId};

use super::{RepositoryError, parse_timestamp};

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    product_id: i64,
    user_name: String,
    user_email: String,
    rating: i64,
    review_text: String,
    created_at: String,
}

impl ReviewRow {
    fn into_review(self) -> Result<Review, RepositoryError> {
        Ok(Review {
            id: ReviewId::new(self.id),
            product_id: ProductId::new(self.product_id),
            user_name: self.user_name,
            user_email: self.user_email,
            rating: self.rating,
            review_text: self.review_text,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a review and return it with its server-assigned id and
    /// timestamp.
    ///
    /// Input validation (rating bounds, product existence) is the caller's
    /// responsibility; this is a plain insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        product_id: ProductId,
        user_name: &str,
        user_email: &str,
        rating: i64,
        review_text: &str,
    ) -> Result<Review, RepositoryError> {
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO reviews (product_id, user_name, user_email, rating, review_text, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id
            ",
        )
        .bind(product_id.as_i64())
        .bind(user_name)
        .bind(user_email)
        .bind(rating)
        .bind(review_text)
        .bind(created_at.to_rfc3339())
        .fetch_one(self.pool)
        .await?;

        Ok(Review {
            id: ReviewId::new(id),
            product_id,
            user_name: user_name.to_owned(),
            user_email: user_email.to_owned(),
            rating,
            review_text: review_text.to_owned(),
            created_at,
        })
    }

    /// List reviews for a product, newest first.
    ///
    /// Returns an empty vec if the product has no reviews (or doesn't exist).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT id, product_id, user_name, user_email, rating, review_text, created_at
            FROM reviews
            WHERE product_id = ?1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(product_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ReviewRow::into_review).collect()
    }
}
