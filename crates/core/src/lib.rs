//! Loftwood Core - Shared types library.
//!
//! This crate provides common types used across the Loftwood components:
//! - `server` - JSON API backend for the furniture storefront
//! - `client` - Browser-mirror state container (auth, cart, search)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, validated emails, display prices, and the wire
//!   DTOs shared between the server and the client.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
