//! Memo route handlers.
//!
//! Every handler here requires a session. A malformed memo id never produces
//! an error page: the request is dropped and the client goes back to `/`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use memopad_core::{Memo, MemoId};

use crate::error::add_breadcrumb;
use crate::extract::{FormFields, QueryFields};
use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Memo list template.
#[derive(Template, WebTemplate)]
#[template(path = "memos/index.html")]
pub struct MemoIndexTemplate {
    pub username: String,
    pub memos: Vec<Memo>,
}

/// Memo edit template.
#[derive(Template, WebTemplate)]
#[template(path = "memos/edit.html")]
pub struct MemoEditTemplate {
    pub memo: Memo,
}

fn parse_id(raw: &str) -> Option<MemoId> {
    raw.parse::<MemoId>().ok()
}

// =============================================================================
// Routes
// =============================================================================

/// Display the memo list.
pub async fn index(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
) -> impl IntoResponse {
    MemoIndexTemplate {
        username: user.username,
        memos: state.store().memos(),
    }
}

/// Handle new memo form submission.
pub async fn create(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    FormFields(form): FormFields,
) -> Redirect {
    let id = state.store().add_memo(form.string("text"));
    tracing::debug!(memo_id = %id, username = %user.username, "memo added");
    add_breadcrumb("memo", "Added memo", Some(&[("memo_id", id.to_string().as_str())]));

    Redirect::to("/")
}

/// Display the edit page for a memo.
///
/// Only the first `id` in the query counts. A missing or non-numeric id
/// redirects to `/`. A numeric id that matches no memo renders the form for
/// a blank memo (id 0).
pub async fn edit_page(
    State(state): State<AppState>,
    RequireSession(_user): RequireSession,
    QueryFields(query): QueryFields,
) -> Response {
    let Some(id) = query.get("id").and_then(parse_id) else {
        return Redirect::to("/").into_response();
    };

    let memo = state.store().find_memo(id).unwrap_or_default();
    MemoEditTemplate { memo }.into_response()
}

/// Handle edit form submission.
///
/// Always redirects to `/`; unknown or malformed ids change nothing.
pub async fn update(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    FormFields(form): FormFields,
) -> Redirect {
    let raw_id = form.value("id");
    if let Some(id) = parse_id(raw_id) {
        let updated = state.store().update_memo(id, form.string("text"));
        tracing::debug!(memo_id = %id, updated, username = %user.username, "memo edit");
        add_breadcrumb("memo", "Edited memo", Some(&[("memo_id", id.to_string().as_str())]));
    } else {
        tracing::debug!(raw_id, "memo edit ignored: malformed id");
    }

    Redirect::to("/")
}

/// Handle memo deletion.
///
/// Always redirects to `/`; unknown or malformed ids change nothing.
pub async fn delete(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    FormFields(form): FormFields,
) -> Redirect {
    let raw_id = form.value("id");
    if let Some(id) = parse_id(raw_id) {
        let deleted = state.store().delete_memo(id);
        tracing::debug!(memo_id = %id, deleted, username = %user.username, "memo delete");
        add_breadcrumb("memo", "Deleted memo", Some(&[("memo_id", id.to_string().as_str())]));
    } else {
        tracing::debug!(raw_id, "memo delete ignored: malformed id");
    }

    Redirect::to("/")
}
