//! API schema types for request/response definitions.
//!
//! Each sub-module defines the request and response types for one area of
//! the API. Types use serde derives for JSON serialization/deserialization.

pub mod form;
pub mod view;
pub mod wishes;
