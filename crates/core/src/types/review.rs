//! Review wire type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{ProductId, ReviewId};

/// Lowest accepted rating.
pub const MIN_RATING: i64 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i64 = 5;

/// A product review. Append-only; never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review ID.
    pub id: ReviewId,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Reviewer's display name.
    pub user_name: String,
    /// Reviewer's email.
    pub user_email: String,
    /// Rating, 1..=5 inclusive.
    pub rating: i64,
    /// Review body.
    pub review_text: String,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
}
