//! Schema types for the wish list endpoints.

use serde::Serialize;

use wishlist_core::Wish;

/// The store's collection in display order.
#[derive(Debug, Clone, Serialize)]
pub struct WishListResponse {
    pub count: usize,
    pub wishes: Vec<Wish>,
}
