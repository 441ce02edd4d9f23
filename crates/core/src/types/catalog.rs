//! Catalog wire types.
//!
//! Products and categories are read-only from the storefront's perspective;
//! these are the JSON shapes the catalog endpoints return.

use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ProductId};
use crate::types::price::DisplayPrice;

/// A catalog product, enriched with its ordered image list and the name of
/// its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Display-formatted price string.
    pub price: DisplayPrice,
    /// Long description.
    pub description: Option<String>,
    /// Free-text characteristics block.
    pub characteristics: Option<String>,
    /// Owning category, if any.
    pub category_id: Option<CategoryId>,
    /// Name of the owning category (joined for display).
    pub category_name: Option<String>,
    /// Image URLs in display order.
    pub images: Vec<String>,
}

/// A catalog category with its derived product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug (unique).
    pub slug: String,
    /// Number of products currently in this category.
    pub products_count: i64,
}
