//! Application state shared by all request handlers.
//!
//! Built once at startup from [`Config`] and cloned per request. The store
//! handle is the only shared resource and is used read-only.

use std::sync::Arc;

use rediscan_core::discovery::ListScanner;
use rediscan_core::navigator::ListNavigator;
use rediscan_core::store::{InMemoryStore, ListStore};

use crate::{config::Config, mock_data::seed_demo_lists};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Backing store, used directly by health checks.
    pub store: Arc<dyn ListStore>,
    /// Resolves `/lindex` requests.
    pub navigator: ListNavigator,
    /// Finds lists for the index page.
    pub scanner: ListScanner,
    /// Maximum number of lists shown on the index page.
    pub max_lists: usize,
}

impl AppState {
    /// Creates the state around an existing store.
    pub fn new(store: Arc<dyn ListStore>, config: &Config) -> Self {
        let navigator = ListNavigator::new(store.clone(), config.max_preload_size);
        let scanner = ListScanner::new(store.clone()).with_pattern(config.scan_pattern.clone());

        Self {
            store,
            navigator,
            scanner,
            max_lists: config.max_lists,
        }
    }

    /// Creates a state backed by an in-memory store seeded with demo lists.
    pub async fn with_demo_data(config: &Config) -> Self {
        let store = InMemoryStore::new();
        seed_demo_lists(&store).await;
        Self::new(Arc::new(store), config)
    }
}
