//! Request ID middleware for request tracing and correlation.
//!
//! Reuses an upstream `x-request-id` header when it looks like a correlation
//! token, otherwise generates a UUID v4. The id is recorded on the current
//! tracing span, tagged on the Sentry scope and echoed back in the response
//! headers.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id accepted as-is.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Pick the request id for a set of headers.
///
/// An upstream id is kept only if it is non-empty, at most
/// [`MAX_REQUEST_ID_LEN`] bytes and visible ASCII with no spaces, so it can
/// be logged and echoed verbatim.
#[must_use]
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_acceptable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN && id.bytes().all(|b| b.is_ascii_graphic())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn with_id(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn is_generated(id: &str) -> bool {
        Uuid::parse_str(id).is_ok_and(|uuid| uuid.get_version_num() == 4)
    }

    #[test]
    fn test_upstream_id_reused() {
        assert_eq!(resolve_request_id(&with_id("req-123")), "req-123");
        let max = "a".repeat(MAX_REQUEST_ID_LEN);
        assert_eq!(resolve_request_id(&with_id(&max)), max);
    }

    #[test]
    fn test_missing_id_generated() {
        assert!(is_generated(&resolve_request_id(&HeaderMap::new())));
    }

    #[test]
    fn test_unusable_upstream_ids_replaced() {
        let too_long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        for value in ["", "has space", "tab\there", too_long.as_str()] {
            let id = resolve_request_id(&with_id(value));
            assert!(is_generated(&id), "{value:?} should be replaced, got {id}");
        }
    }
}
