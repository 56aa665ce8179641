//! Data model for the wishlist: the [`Wish`] entity, its id, and the value
//! sets used to create and edit it.

pub mod error;
pub mod id;
pub mod wish;

// Re-export commonly used types
pub use error::CoreError;
pub use id::WishId;
pub use wish::{Wish, WishDraft, WishPatch};
