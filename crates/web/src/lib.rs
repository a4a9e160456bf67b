//! Memopad web library.
//!
//! This crate provides the memo board as a library, allowing it to be
//! tested and reused. The `memopad` binary wires it to a TCP listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod extract;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
