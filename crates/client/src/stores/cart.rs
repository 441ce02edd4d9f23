//! Shopping cart store.
//!
//! The cart lives entirely on the client; the server never sees it. Every
//! mutation persists the new contents through the injected [`CartStorage`];
//! a failed save is logged and the in-memory cart stays authoritative.

use serde::{Deserialize, Serialize};

use loftwood_core::{DisplayPrice, Product, ProductId};

use crate::storage::CartStorage;

/// One cart line: a product snapshot and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Snapshot of the product at the time it was added.
    pub product: Product,
    /// Always at least 1; a line that would drop to 0 is removed instead.
    pub quantity: u32,
}

/// The shopping cart.
pub struct CartStore {
    items: Vec<CartItem>,
    storage: Box<dyn CartStorage>,
}

impl CartStore {
    /// Create a cart over a storage backend, restoring whatever it holds.
    #[must_use]
    pub fn new(storage: Box<dyn CartStorage>) -> Self {
        let items = storage.load();
        Self { items, storage }
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add one unit of a product. Adding a product already in the cart
    /// bumps its quantity instead of creating a second line.
    pub fn add(&mut self, product: Product) {
        self.add_quantity(product, 1);
    }

    /// Add several units at once, merging into an existing line. Zero is a
    /// no-op.
    pub fn add_quantity(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += quantity;
        } else {
            self.items.push(CartItem { product, quantity });
        }
        self.persist();
    }

    /// Increase a line's quantity by one. Unknown products are ignored.
    pub fn increase(&mut self, product_id: ProductId) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity += 1;
            self.persist();
        }
    }

    /// Decrease a line's quantity by one, removing the line at zero.
    pub fn decrease(&mut self, product_id: ProductId) {
        if let Some(index) = self.items.iter().position(|i| i.product.id == product_id) {
            if self.items[index].quantity > 1 {
                self.items[index].quantity -= 1;
            } else {
                self.items.remove(index);
            }
            self.persist();
        }
    }

    /// Set a line's quantity outright. Zero (or less, at the wire level)
    /// removes the line. Unknown products are ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(index) = self.items.iter().position(|i| i.product.id == product_id) {
            if quantity == 0 {
                self.items.remove(index);
            } else {
                self.items[index].quantity = quantity;
            }
            self.persist();
        }
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, product_id: ProductId) {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.persist();
        }
    }

    /// Whether the product has a line in the cart.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.product.id == product_id)
    }

    /// Quantity for a product, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total price in whole rubles, from the display prices.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.items
            .iter()
            .map(|i| i.product.price.numeric_value() * u64::from(i.quantity))
            .sum()
    }

    /// Total price formatted the way catalog prices are displayed.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        DisplayPrice::format_amount(self.total_price())
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.items) {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }
}
