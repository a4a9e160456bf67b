//! Id minting policy for memos and sessions.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Rule used to pick the next memo id or session id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Next id is the current collection size plus one.
    ///
    /// Ids come back after a deletion, so two memos can share an id. Session
    /// ids stay unique only because sessions are never removed.
    #[default]
    LiveCount,
    /// Next id is one more than the number of ids ever minted. Never reused.
    Monotonic,
}

/// Error parsing an [`IdPolicy`] name.
#[derive(Debug, Error)]
#[error("unknown id policy {0:?} (expected \"live-count\" or \"monotonic\")")]
pub struct IdPolicyError(String);

impl IdPolicy {
    /// Pick the next id given the live collection size and the count of ids
    /// minted so far, including the one being minted now.
    #[must_use]
    pub fn next(self, live: usize, minted: u64) -> u64 {
        match self {
            Self::LiveCount => u64::try_from(live).unwrap_or(u64::MAX).saturating_add(1),
            Self::Monotonic => minted,
        }
    }

    /// Configuration name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LiveCount => "live-count",
            Self::Monotonic => "monotonic",
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdPolicy {
    type Err = IdPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live-count" | "live_count" | "livecount" => Ok(Self::LiveCount),
            "monotonic" => Ok(Self::Monotonic),
            _ => Err(IdPolicyError(s.to_owned())),
        }
    }
}
