//! Business services layered over the repositories.

pub mod auth;
pub mod avatars;
pub mod session;
