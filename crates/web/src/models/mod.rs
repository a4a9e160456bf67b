//! Domain models for memopad.
//!
//! `Memo` lives in `memopad-core`; the types here only make sense inside the
//! web process.

pub mod session;
pub mod user;

pub use session::{CurrentUser, Session};
pub use user::User;
