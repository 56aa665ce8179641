//! The [`FetchSource`] trait: where the store's initial collection comes from.
//!
//! [`StubFetchSource`] is the only backend: it waits out a simulated fetch
//! latency and returns two fixed records.

use async_trait::async_trait;

use wishlist_core::{Wish, WishDraft, WishId};

use crate::delay::{NetworkDelay, FETCH_LATENCY};
use crate::error::FetchError;

/// Asynchronous provider of the full wish collection.
#[async_trait]
pub trait FetchSource: Send + Sync {
    /// Returns every wish the source knows about.
    async fn fetch_all(&self) -> Result<Vec<Wish>, FetchError>;
}

/// Canned source returning `PS5` and `Mac-mini` with fresh ids.
#[derive(Debug, Clone)]
pub struct StubFetchSource {
    delay: NetworkDelay,
}

impl StubFetchSource {
    pub fn new(delay: NetworkDelay) -> Self {
        StubFetchSource { delay }
    }

    /// The fixed records, without ids.
    pub fn seed() -> Vec<WishDraft> {
        vec![
            WishDraft::new("PS5", "Not used yet"),
            WishDraft::new("Mac-mini", "at least 2018"),
        ]
    }
}

impl Default for StubFetchSource {
    fn default() -> Self {
        Self::new(NetworkDelay::new(FETCH_LATENCY))
    }
}

#[async_trait]
impl FetchSource for StubFetchSource {
    async fn fetch_all(&self) -> Result<Vec<Wish>, FetchError> {
        self.delay.wait().await;
        Ok(Self::seed()
            .into_iter()
            .map(|draft| Wish::new(WishId::new(), draft))
            .collect())
    }
}
