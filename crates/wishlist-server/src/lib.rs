//! Wishlist screen logic and its HTTP/JSON surface.
//!
//! The headless parts are [`form::FormController`] and [`view::WishlistView`];
//! any surface drives the view's intents and draws its
//! [`schema::view::ViewModel`]. This crate also contains the axum router,
//! handlers, error mapping and environment configuration for serving the
//! view over HTTP.

pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
pub mod view;
