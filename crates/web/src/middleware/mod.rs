//! HTTP middleware stack for memopad.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (binary only, capture errors)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (reuse or generate, echo in response)
//!
//! Session checks are not a layer: protected handlers take the
//! [`RequireSession`] extractor so public routes stay untouched.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{AuthRejection, RequireSession, current_user, is_logged_in};
pub use request_id::request_id_middleware;
pub use session::{SESSION_COOKIE_NAME, session_cookie, session_set_cookie};
