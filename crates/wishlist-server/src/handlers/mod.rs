//! HTTP handler modules for the wishlist API.
//!
//! Handlers parse path and body, forward the intent to the
//! [`WishlistView`](crate::view::WishlistView), and return the rendered view.
//! No business logic lives in handlers.

pub mod form;
pub mod view;
pub mod wishes;
