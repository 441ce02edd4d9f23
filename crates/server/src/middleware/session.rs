//! Session cookie construction.
//!
//! The session cookie is the only thing the browser holds: an opaque token
//! naming a `sessions` row. HttpOnly and SameSite=Lax; the cookie max-age
//! always matches the server-side expiry of the session it names.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;

use crate::models::SESSION_COOKIE_NAME;

/// Build the session cookie for a freshly issued token.
#[must_use]
pub fn session_cookie(token: String, ttl: Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

/// Build a cookie that removes the session cookie from the browser.
///
/// Attributes must match the ones the cookie was set with, or browsers
/// keep the original.
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok".to_owned(), Duration::days(1));
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(24 * 60 * 60))
        );
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
