//! Domain types for the server.
//!
//! These types represent validated domain objects separate from database
//! row types and from the wire DTOs in `loftwood-core`.

pub mod session;
pub mod user;

pub use session::SESSION_COOKIE_NAME;
pub use user::User;
