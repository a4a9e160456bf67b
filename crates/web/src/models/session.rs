//! Session-related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use memopad_core::SessionId;

/// A server-side login record.
///
/// Sessions never expire and are never removed; `created_at` is kept for
/// display and logging only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Token carried in the `session_id` cookie.
    pub id: SessionId,
    /// User who logged in.
    pub username: String,
    /// When the session was minted.
    pub created_at: DateTime<Utc>,
}

/// Request-scoped identity of the logged-in user.
///
/// Produced by the `RequireSession` extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Session the request authenticated with.
    pub session_id: SessionId,
    /// Username bound to that session.
    pub username: String,
}
