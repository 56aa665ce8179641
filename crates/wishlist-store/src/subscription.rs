//! Change listeners for the store.
//!
//! Listeners are held in a `DashMap` keyed by a monotonically increasing id.
//! A [`Subscription`] guard removes its listener when dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;

use wishlist_core::Wish;

/// Callback invoked with the collection snapshot after each committed mutation.
pub type Listener = Arc<dyn Fn(&[Wish]) + Send + Sync>;

/// Registry of live listeners.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: DashMap<u64, Listener>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    pub(crate) fn register(self: &Arc<Self>, listener: Listener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.insert(id, listener);
        Subscription {
            id,
            registry: Arc::downgrade(self),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Calls every listener with `snapshot`.
    ///
    /// Listeners are cloned out of the map first so a listener may subscribe
    /// or unsubscribe without deadlocking on a shard lock.
    pub(crate) fn notify(&self, snapshot: &[Wish]) {
        let listeners: Vec<Listener> = self
            .listeners
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}

/// Handle for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<ListenerRegistry>,
}

impl Subscription {
    /// Removes the listener now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.listeners.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn drop_removes_listener() {
        let registry = Arc::new(ListenerRegistry::default());
        let sub = registry.register(Arc::new(|_: &[Wish]| {}));
        assert_eq!(registry.len(), 1);
        drop(sub);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn notify_reaches_every_listener() {
        let registry = Arc::new(ListenerRegistry::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let subs: Vec<Subscription> = (0..3)
            .map(|_| {
                let calls = Arc::clone(&calls);
                registry.register(Arc::new(move |_: &[Wish]| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }))
            })
            .collect();

        registry.notify(&[]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        drop(subs);
        registry.notify(&[]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let registry = Arc::new(ListenerRegistry::default());
        let sub = registry.register(Arc::new(|_: &[Wish]| {}));
        drop(registry);
        sub.unsubscribe();
    }
}
