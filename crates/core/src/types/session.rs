//! Session identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque session token carried in the `session_id` cookie.
///
/// Tokens are minted as decimal strings (`"1"`, `"2"`, ...) but are compared
/// as plain strings: a cookie value of `"01"` does not match session `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Build the token for the `n`-th minted session.
    #[must_use]
    pub fn from_sequence(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Wrap a raw cookie value.
    #[must_use]
    pub fn from_cookie(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
