//! User management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use crate::error::add_breadcrumb;
use crate::extract::FormFields;
use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

/// User list template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    pub current: String,
    pub usernames: Vec<String>,
}

/// Display all registered users.
pub async fn index(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
) -> impl IntoResponse {
    UsersTemplate {
        current: user.username,
        usernames: state.store().usernames(),
    }
}

/// Handle user deletion.
///
/// Any logged-in user may delete any account, including their own. Sessions
/// held by the deleted user keep working.
pub async fn delete(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    FormFields(form): FormFields,
) -> Redirect {
    let target = form.value("username");
    let deleted = state.store().delete_user(target);
    tracing::info!(
        target_user = %target,
        deleted,
        by = %user.username,
        "user delete"
    );
    add_breadcrumb("user", "Deleted user", Some(&[("username", target)]));

    Redirect::to("/users")
}
