//! Shared application state for Axum handlers.
//!
//! Cloned into every handler; all members are reference-counted so a
//! clone is a handful of pointer copies.

use std::sync::Arc;

use crate::config::Config;
use crate::store::UserStore;

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory user collection
    pub store: UserStore,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create state with an empty store.
    pub fn new(config: Config) -> Self {
        Self::with_store(UserStore::new(), config)
    }

    /// Create state around an existing store.
    ///
    /// Tests use this to inspect the store after driving requests.
    pub fn with_store(store: UserStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
