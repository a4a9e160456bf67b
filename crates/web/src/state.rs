//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::MemopadConfig;
use crate::services::auth::AuthService;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Store,
}

impl AppState {
    /// Create a new application state with an empty store.
    ///
    /// The store's id policy comes from `config.id_policy`.
    #[must_use]
    pub fn new(config: &MemopadConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Store::new(config.id_policy),
            }),
        }
    }

    /// Get a reference to the in-memory store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Authentication service bound to this state's store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.store)
    }
}
