//! Authentication extractors.
//!
//! Provides an extractor for requiring a valid session in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use memopad_core::SessionId;

use super::session::session_cookie;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Extractor that requires a live session.
///
/// If the request has no `session_id` cookie, or the cookie names an unknown
/// session, the handler is not run and the client is sent to `/login`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSession(user): RequireSession,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireSession(pub CurrentUser);

/// Rejection returned when a protected route is hit without a live session.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        current_user(state, &parts.headers)
            .map(Self)
            .ok_or(AuthRejection)
    }
}

/// Resolve the logged-in user for a set of request headers.
#[must_use]
pub fn current_user(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let token = session_cookie(headers)?;
    let username = state.auth().current_user(Some(&token))?;

    Some(CurrentUser {
        session_id: SessionId::from_cookie(token),
        username,
    })
}

/// Whether the request headers carry a live session cookie.
#[must_use]
pub fn is_logged_in(state: &AppState, headers: &HeaderMap) -> bool {
    current_user(state, headers).is_some()
}
