//! Core error types for wishlist-core.

use thiserror::Error;

/// Errors produced by the core data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string could not be parsed as a [`WishId`](crate::WishId).
    #[error("invalid wish id '{input}': {reason}")]
    InvalidWishId { input: String, reason: String },
}
