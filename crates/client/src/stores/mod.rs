//! Client-side state stores.
//!
//! Each store owns one slice of UI state and its mutations. Server calls
//! go through [`crate::ApiClient`]; the stores record the outcome.

pub mod auth;
pub mod cart;
pub mod reviews;
pub mod search;

pub use auth::AuthStore;
pub use cart::{CartItem, CartStore};
pub use reviews::ReviewsStore;
pub use search::SearchStore;
