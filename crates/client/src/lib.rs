//! Loftwood storefront client.
//!
//! A typed client for the Loftwood API plus the client-side state the
//! storefront UI hangs off: the cart, the search box, the auth mirror, and
//! a per-product review cache. The stores own plain data and synchronous
//! mutations; everything that talks to the server goes through
//! [`api::ApiClient`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod storage;
pub mod stores;

pub use api::{ApiClient, ApiError};
pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage};
