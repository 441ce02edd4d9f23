//! Session constants.
//!
//! A session is a row in the `sessions` table: an opaque unguessable token
//! (the primary key), the owning user, and an explicit expiry. One user may
//! hold multiple concurrent sessions. Expired rows are inert; they are only
//! excluded by the expiry check at validation time.

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "sessionId";
