//! Memo record.

use serde::{Deserialize, Serialize};

use crate::MemoId;

/// A user-visible text note.
///
/// The default value (id 0, empty text) is what the edit view shows when the
/// requested id does not match any memo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Numeric identifier, assigned by the store.
    pub id: MemoId,
    /// Memo body.
    pub text: String,
}

impl Memo {
    /// Create a memo.
    #[must_use]
    pub fn new(id: MemoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
