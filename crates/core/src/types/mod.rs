//! Core types for memopad.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod memo;
pub mod session;

pub use id::*;
pub use memo::Memo;
pub use session::SessionId;
