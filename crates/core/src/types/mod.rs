//! Core types for Loftwood.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! JSON payload types exchanged between the server and the client.

pub mod catalog;
pub mod email;
pub mod id;
pub mod price;
pub mod review;
pub mod user;

pub use catalog::{Category, Product};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::DisplayPrice;
pub use review::{MAX_RATING, MIN_RATING, Review};
pub use user::{PublicUser, UserIdentity};
