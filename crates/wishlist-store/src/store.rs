//! In-memory wish store with delayed, asynchronous mutations.
//!
//! [`WishStore`] is an explicitly constructed, cheaply cloneable handle around
//! an insertion-ordered map keyed by [`WishId`]. Every mutation waits out the
//! simulated network delay and then commits.
//!
//! # Ordering
//!
//! Mutations are neither queued nor serialized. Each one runs on its own
//! spawned task and commits when its delay elapses, so two in-flight edits of
//! the same wish resolve as "last to complete wins". Because the delay and the
//! commit run on a spawned task, dropping the caller's future does not cancel
//! a started mutation.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use wishlist_core::{Wish, WishId, WishPatch};

use crate::delay::NetworkDelay;
use crate::error::StoreError;
use crate::source::{FetchSource, StubFetchSource};
use crate::subscription::{Listener, ListenerRegistry, Subscription};

/// Handle to the shared wish collection.
#[derive(Clone)]
pub struct WishStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    wishes: RwLock<IndexMap<WishId, Wish>>,
    source: Arc<dyn FetchSource>,
    mutation_delay: NetworkDelay,
    listeners: Arc<ListenerRegistry>,
}

impl WishStore {
    /// Creates an empty store backed by `source`.
    pub fn new(source: Arc<dyn FetchSource>, mutation_delay: NetworkDelay) -> Self {
        WishStore {
            inner: Arc::new(StoreInner {
                wishes: RwLock::new(IndexMap::new()),
                source,
                mutation_delay,
                listeners: Arc::new(ListenerRegistry::default()),
            }),
        }
    }

    /// Creates an empty store backed by the stub source.
    pub fn with_stub(fetch_delay: NetworkDelay, mutation_delay: NetworkDelay) -> Self {
        Self::new(Arc::new(StubFetchSource::new(fetch_delay)), mutation_delay)
    }

    pub fn mutation_delay(&self) -> NetworkDelay {
        self.inner.mutation_delay
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Replaces the whole collection with the source's result.
    ///
    /// Returns the number of wishes loaded. On failure the previous
    /// collection is kept.
    pub async fn fetch(&self) -> Result<usize, StoreError> {
        let inner = Arc::clone(&self.inner);
        detach(async move { inner.fetch().await }).await
    }

    /// Appends `wish` after the mutation delay.
    pub async fn add(&self, wish: Wish) -> Result<(), StoreError> {
        let inner = Arc::clone(&self.inner);
        detach(async move {
            inner.mutation_delay.wait().await;
            inner.add(wish)
        })
        .await
    }

    /// Applies `patch` to the wish with `id` after the mutation delay and
    /// returns the updated wish.
    pub async fn edit_by_id(
        &self,
        id: WishId,
        patch: impl Into<WishPatch>,
    ) -> Result<Wish, StoreError> {
        let inner = Arc::clone(&self.inner);
        let patch = patch.into();
        detach(async move {
            inner.mutation_delay.wait().await;
            inner.edit(id, patch)
        })
        .await
    }

    /// Deletes the wish with `id` after the mutation delay and returns it.
    pub async fn remove_by_id(&self, id: WishId) -> Result<Wish, StoreError> {
        let inner = Arc::clone(&self.inner);
        detach(async move {
            inner.mutation_delay.wait().await;
            inner.remove(id)
        })
        .await
    }

    // -------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------

    /// Clones the collection in display order.
    pub fn snapshot(&self) -> Vec<Wish> {
        self.inner.read().values().cloned().collect()
    }

    pub fn get(&self, id: WishId) -> Option<Wish> {
        self.inner.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    // -------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------

    /// Registers `listener` to run after every committed mutation.
    ///
    /// The listener runs synchronously on the committing task while the
    /// collection is locked: it must not block or call back into the store.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Wish]) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        self.inner.listeners.register(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl Default for WishStore {
    fn default() -> Self {
        Self::new(Arc::new(StubFetchSource::default()), NetworkDelay::default())
    }
}

impl std::fmt::Debug for WishStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishStore")
            .field("len", &self.len())
            .field("mutation_delay", &self.inner.mutation_delay)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl StoreInner {
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<WishId, Wish>> {
        self.wishes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<WishId, Wish>> {
        self.wishes.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hands the committed collection to every listener.
    ///
    /// Called with the write guard still held so listeners observe commits
    /// in commit order.
    fn publish(&self, wishes: &IndexMap<WishId, Wish>) {
        let snapshot: Vec<Wish> = wishes.values().cloned().collect();
        self.listeners.notify(&snapshot);
    }

    async fn fetch(&self) -> Result<usize, StoreError> {
        let fetched = match self.source.fetch_all().await {
            Ok(wishes) => wishes,
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed, keeping previous wishes");
                return Err(err.into());
            }
        };

        let mut replacement = IndexMap::with_capacity(fetched.len());
        for wish in fetched {
            let id = wish.id;
            if replacement.insert(id, wish).is_some() {
                tracing::warn!(%id, "fetch returned a duplicate id, keeping previous wishes");
                return Err(StoreError::DuplicateId(id));
            }
        }

        let count = replacement.len();
        {
            let mut wishes = self.write();
            *wishes = replacement;
            self.publish(&wishes);
        }
        tracing::info!(count, "fetched wishes");
        Ok(count)
    }

    fn add(&self, wish: Wish) -> Result<(), StoreError> {
        let id = wish.id;
        {
            let mut wishes = self.write();
            if wishes.contains_key(&id) {
                tracing::warn!(%id, "rejected add with duplicate id");
                return Err(StoreError::DuplicateId(id));
            }
            wishes.insert(id, wish);
            self.publish(&wishes);
        }
        tracing::info!(%id, "added wish");
        Ok(())
    }

    fn edit(&self, id: WishId, patch: WishPatch) -> Result<Wish, StoreError> {
        let updated = {
            let mut wishes = self.write();
            let Some(wish) = wishes.get_mut(&id) else {
                tracing::debug!(%id, "edit of missing wish ignored");
                return Err(StoreError::NotFound(id));
            };
            wish.apply(patch);
            let updated = wish.clone();
            self.publish(&wishes);
            updated
        };
        tracing::info!(%id, "edited wish");
        Ok(updated)
    }

    fn remove(&self, id: WishId) -> Result<Wish, StoreError> {
        let removed = {
            let mut wishes = self.write();
            let Some(removed) = wishes.shift_remove(&id) else {
                tracing::debug!(%id, "remove of missing wish ignored");
                return Err(StoreError::NotFound(id));
            };
            self.publish(&wishes);
            removed
        };
        tracing::info!(%id, "removed wish");
        Ok(removed)
    }
}

/// Runs `fut` on its own task so the caller dropping its future cannot
/// abort a started mutation.
async fn detach<T, F>(fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(fut)
        .await
        .map_err(|err| StoreError::Interrupted(err.to_string()))?
}
