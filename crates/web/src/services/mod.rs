//! Business logic services for memopad.
//!
//! # Services
//!
//! - `auth` - Registration, plaintext password login, and session lookup

pub mod auth;
