//! Store error types for wishlist-store.
//!
//! [`StoreError`] covers every outcome of a store operation that is not a
//! committed mutation. All of them leave the collection unchanged.

use thiserror::Error;

use wishlist_core::WishId;

/// Failure reported by a [`FetchSource`](crate::FetchSource).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        FetchError {
            message: message.into(),
        }
    }
}

/// Errors produced by store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The fetch source failed; the previous collection is retained.
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    /// No wish with the given id is in the collection.
    #[error("wish not found: {0}")]
    NotFound(WishId),

    /// A wish with the given id is already in the collection.
    #[error("duplicate wish id: {0}")]
    DuplicateId(WishId),

    /// The task running a delayed mutation panicked or was shut down.
    #[error("mutation task interrupted: {0}")]
    Interrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_converts_and_displays() {
        let err = StoreError::from(FetchError::new("offline"));
        assert_eq!(err.to_string(), "fetch failed: offline");
    }

    #[test]
    fn not_found_names_the_id() {
        let id = WishId::new();
        let err = StoreError::NotFound(id);
        assert_eq!(err.to_string(), format!("wish not found: {id}"));
    }

    const _: () = {
        #[allow(dead_code)]
        fn assert_send_sync<T: Send + Sync>() {}

        #[allow(dead_code)]
        fn check() {
            assert_send_sync::<StoreError>();
        }
    };
}
