//! Memopad Core - Shared types library.
//!
//! This crate provides the domain types used across memopad components:
//! - `web` - Server-rendered memo application
//! - `integration-tests` - End-to-end HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no locking,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for memo ids and session ids, and the `Memo` record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
