//! Lenient request field extractors.
//!
//! Memo and auth handlers never answer a bad submission with a 4xx: repeated
//! keys resolve to their first value, and a body that is not
//! `application/x-www-form-urlencoded` (or cannot be read) contributes no
//! fields, so every lookup falls back to an empty string.

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, header::CONTENT_TYPE, request::Parts},
};
use url::form_urlencoded;

/// Media type of an HTML form body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decoded `name=value` pairs in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pairs: Vec<(String, String)>,
}

impl Fields {
    /// Decode a urlencoded string. Malformed escapes decode lossily.
    #[must_use]
    pub fn parse(input: &[u8]) -> Self {
        Self {
            pairs: form_urlencoded::parse(input).into_owned().collect(),
        }
    }

    /// First value for `name`, if the key is present at all.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value for `name`, or `""` when absent.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Owned copy of [`Fields::value`].
    #[must_use]
    pub fn string(&self, name: &str) -> String {
        self.value(name).to_string()
    }
}

/// Fields from the URL query string only.
#[derive(Debug, Clone, Default)]
pub struct QueryFields(pub Fields);

impl<S> FromRequestParts<S> for QueryFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(query_fields(&parts.uri)))
    }
}

/// Fields from a form body followed by the URL query string.
///
/// Body values come first, so a key present in both resolves to the body.
#[derive(Debug, Clone, Default)]
pub struct FormFields(pub Fields);

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = query_fields(req.uri());

        let mut fields = if is_form(req.headers()) {
            match Bytes::from_request(req, state).await {
                Ok(body) => Fields::parse(&body),
                Err(e) => {
                    tracing::debug!(error = %e, "form body unreadable, treating as empty");
                    Fields::default()
                }
            }
        } else {
            Fields::default()
        };

        fields.pairs.extend(query.pairs);
        Ok(Self(fields))
    }
}

fn query_fields(uri: &axum::http::Uri) -> Fields {
    Fields::parse(uri.query().unwrap_or_default().as_bytes())
}

/// Whether the `Content-Type` names a urlencoded form, ignoring parameters.
fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    async fn form(uri: &str, content_type: Option<&str>, body: &'static str) -> Fields {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        FormFields::from_request(req, &()).await.unwrap().0
    }

    #[test]
    fn test_first_value_wins() {
        let fields = Fields::parse(b"text=a&text=b&id=7");
        assert_eq!(fields.get("text"), Some("a"));
        assert_eq!(fields.value("id"), "7");
    }

    #[test]
    fn test_missing_and_empty_keys() {
        let fields = Fields::parse(b"id=&flag");
        assert_eq!(fields.get("id"), Some(""));
        assert_eq!(fields.get("flag"), Some(""));
        assert_eq!(fields.get("text"), None);
        assert_eq!(fields.value("text"), "");
    }

    #[test]
    fn test_percent_and_plus_decoding() {
        let fields = Fields::parse(b"text=buy+oat%20milk%21");
        assert_eq!(fields.value("text"), "buy oat milk!");
    }

    #[tokio::test]
    async fn test_form_body_parsed() {
        let fields = form("/", Some(FORM_CONTENT_TYPE), "text=a&text=b").await;
        assert_eq!(fields.value("text"), "a");
    }

    #[tokio::test]
    async fn test_content_type_parameters_ignored() {
        let fields = form(
            "/",
            Some("Application/X-WWW-Form-Urlencoded; charset=UTF-8"),
            "text=hi",
        )
        .await;
        assert_eq!(fields.value("text"), "hi");
    }

    #[tokio::test]
    async fn test_non_form_body_is_empty() {
        let fields = form("/", None, "text=a").await;
        assert_eq!(fields, Fields::default());

        let fields = form("/", Some("application/json"), r#"{"text":"a"}"#).await;
        assert_eq!(fields.get("text"), None);
    }

    #[tokio::test]
    async fn test_body_precedes_query() {
        let fields = form("/edit?id=9&text=q", Some(FORM_CONTENT_TYPE), "id=1").await;
        assert_eq!(fields.value("id"), "1");
        assert_eq!(fields.value("text"), "q");
    }

    #[tokio::test]
    async fn test_query_fields_first_wins() {
        let (mut parts, ()) = Request::builder()
            .uri("/edit?id=1&id=2")
            .body(())
            .unwrap()
            .into_parts();
        let QueryFields(fields) = QueryFields::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(fields.value("id"), "1");
    }
}
