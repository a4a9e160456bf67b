//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

/// My page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/mypage.html")]
pub struct MyPageTemplate {
    pub username: String,
    pub signed_in_at: Option<String>,
}

/// Display the current user's page.
pub async fn mypage(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
) -> impl IntoResponse {
    let signed_in_at = state
        .store()
        .session(&user.session_id)
        .map(|session| session.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    MyPageTemplate {
        username: user.username,
        signed_in_at,
    }
}
