//! Authentication route handlers.
//!
//! Handles login and registration. Failures re-render the same form with no
//! message; the client only ever sees that nothing happened.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::{Result, add_breadcrumb};
use crate::extract::FormFields;
use crate::filters;
use crate::middleware::session_set_cookie;
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate;

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate;

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate
}

/// Handle login form submission.
///
/// On success sets the `session_id` cookie and redirects to `/`.
///
/// # Errors
///
/// Returns `AppError::Header` if the session cookie cannot be encoded.
pub async fn login(
    State(state): State<AppState>,
    FormFields(form): FormFields,
) -> Result<Response> {
    let username = form.value("username");
    match state.auth().login(username, form.value("password")) {
        Ok(session) => {
            let cookie = session_set_cookie(&session.id)?;
            add_breadcrumb("auth", "Logged in", Some(&[("username", session.username.as_str())]));
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        Err(e) => {
            tracing::debug!(username, error = %e, "login failed");
            Ok(LoginTemplate.into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate
}

/// Handle registration form submission.
///
/// A new username is stored and the client is sent to `/login`. A taken
/// username re-renders the registration form.
pub async fn register(
    State(state): State<AppState>,
    FormFields(form): FormFields,
) -> Response {
    let username = form.value("username");
    match state.auth().register(username, form.value("password")) {
        Ok(()) => Redirect::to("/login").into_response(),
        Err(e) => {
            tracing::debug!(username, error = %e, "registration failed");
            RegisterTemplate.into_response()
        }
    }
}
