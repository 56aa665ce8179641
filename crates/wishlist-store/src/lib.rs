//! Reactive in-memory store for wishes.
//!
//! # Modules
//!
//! - [`delay`]: the simulated network latency primitive
//! - [`source`]: the [`FetchSource`] trait and the stub backend
//! - [`store`]: [`WishStore`] and its delayed mutations
//! - [`subscription`]: change listeners and the [`Subscription`] guard
//! - [`error`]: [`StoreError`] and [`FetchError`]

pub mod delay;
pub mod error;
pub mod source;
pub mod store;
pub mod subscription;

pub use delay::{NetworkDelay, FETCH_LATENCY, MUTATION_LATENCY};
pub use error::{FetchError, StoreError};
pub use source::{FetchSource, StubFetchSource};
pub use store::WishStore;
pub use subscription::Subscription;
