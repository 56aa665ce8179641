//! Application state shared by all handlers.
//!
//! [`AppState`] holds the explicitly constructed [`WishStore`] and the single
//! [`WishlistView`] built on it. Both are cheap to clone: the store is a
//! handle and the view sits behind an `Arc`. The view serializes its own
//! session state internally, so handlers never take a lock here.

use std::sync::Arc;

use tokio::task::JoinHandle;

use wishlist_store::WishStore;

use crate::config::ServerConfig;
use crate::view::WishlistView;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub store: WishStore,
    pub view: Arc<WishlistView>,
    pub config: ServerConfig,
}

impl AppState {
    /// Builds the store and view and starts the initial fetch in the
    /// background. Must be called inside a tokio runtime.
    pub fn new(config: ServerConfig) -> Self {
        let state = Self::unloaded(config);
        state.spawn_load();
        state
    }

    /// Builds the store and view without fetching.
    pub fn unloaded(config: ServerConfig) -> Self {
        let store = WishStore::with_stub(config.fetch_delay, config.mutation_delay);
        let view = Arc::new(WishlistView::new(store.clone()));
        AppState {
            store,
            view,
            config,
        }
    }

    /// Runs `view.load()` on a background task. Failures are logged and
    /// surfaced through the view's error message.
    pub fn spawn_load(&self) -> JoinHandle<()> {
        let view = Arc::clone(&self.view);
        tokio::spawn(async move {
            match view.load().await {
                Ok(count) => tracing::info!(count, "initial wishes loaded"),
                Err(err) => tracing::warn!(error = %err, "initial load failed"),
            }
        })
    }
}
