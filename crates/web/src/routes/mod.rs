//! HTTP route handlers for memopad.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # Memos (requires session)
//! GET  /                       - Memo list
//! POST /                       - Add memo (form: text)
//! GET  /edit?id=N              - Edit page
//! POST /edit                   - Update memo (form: id, text)
//! POST /delete                 - Delete memo (form: id)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action, sets `session_id` cookie
//! GET  /register               - Register page
//! POST /register               - Register action
//!
//! # Users (requires session)
//! GET  /users                  - User list
//! POST /users                  - Delete user (form: username)
//!
//! # Account (requires session)
//! GET  /mypage                 - Current username
//! ```
//!
//! Every redirect is `303 See Other`.

pub mod account;
pub mod auth;
pub mod memos;
pub mod users;

use axum::{
    Router,
    extract::Request,
    middleware::from_fn,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::error::not_found;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the memo routes router.
pub fn memo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(memos::index).post(memos::create))
        .route("/edit", get(memos::edit_page).post(memos::update))
        .route("/delete", post(memos::delete))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
}

/// Create all routes for memopad.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(memo_routes())
        .merge(auth_routes())
        .route("/users", get(users::index).post(users::delete))
        .route("/mypage", get(account::mypage))
        .fallback(not_found)
}

/// Build the full application: routes, tracing and request ids, bound to
/// `state`.
///
/// Sentry layers are added by the binary so tests can serve this router
/// without an error-tracking client.
pub fn app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = tracing::field::Empty,
        )
    });

    routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(trace)
            .layer(from_fn(request_id_middleware)),
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
