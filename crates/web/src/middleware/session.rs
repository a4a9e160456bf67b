//! Session cookie codec.
//!
//! The cookie is deliberately bare: `session_id=<token>; Path=/`, with no
//! expiry, `Secure` or `HttpOnly` attributes. Existing clients depend on that
//! shape.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, InvalidHeaderValue},
};
use tower_sessions::cookie::Cookie;

use memopad_core::SessionId;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Session cookie path.
const SESSION_COOKIE_PATH: &str = "/";

/// Extract the session token from the request's `Cookie` headers.
///
/// When several `session_id` cookies are present the first one wins.
/// Malformed cookie pairs are skipped.
#[must_use]
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}

/// Build the `Set-Cookie` value for a freshly minted session.
///
/// # Errors
///
/// Returns an error if the token contains bytes that cannot appear in a header.
pub fn session_set_cookie(id: &SessionId) -> Result<HeaderValue, InvalidHeaderValue> {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, id.as_str().to_owned()))
        .path(SESSION_COOKIE_PATH)
        .build();

    HeaderValue::from_str(&cookie.to_string())
}
