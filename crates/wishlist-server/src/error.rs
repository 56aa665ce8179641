//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all endpoints. It implements
//! `axum::response::IntoResponse` to produce structured JSON error responses
//! with appropriate HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use wishlist_core::CoreError;
use wishlist_store::StoreError;

use crate::form::FormError;
use crate::schema::form::FieldErrorView;
use crate::view::ViewError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details (e.g., field errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Wish not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed id or field name (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Field validators rejected the form (422).
    #[error("validation failed")]
    ValidationFailed(Vec<FieldErrorView>),

    /// Intent not available in the current state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The fetch source failed (502).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::ValidationFailed(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED")
            }
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let detail = match self {
            ApiError::ValidationFailed(errors) => ApiErrorDetail {
                code: code.to_string(),
                message: format!("{} validation error(s)", errors.len()),
                details: serde_json::to_value(errors).ok(),
            },
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Upstream(msg)
            | ApiError::InternalError(msg) => ApiErrorDetail {
                code: code.to_string(),
                message: msg,
                details: None,
            },
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::UnknownField(_) => ApiError::BadRequest(err.to_string()),
            FormError::Submitting => ApiError::Conflict(err.to_string()),
            FormError::Invalid(errors) => ApiError::ValidationFailed(
                errors
                    .into_iter()
                    .map(|(field, message)| FieldErrorView { field, message })
                    .collect(),
            ),
            FormError::SubmitFailed(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::DuplicateId(_) => ApiError::Conflict(err.to_string()),
            StoreError::FetchFailed(_) => ApiError::Upstream(err.to_string()),
            StoreError::Interrupted(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::UnknownWish(_) => ApiError::NotFound(err.to_string()),
            ViewError::AddNewDisabled | ViewError::SubmitDisabled | ViewError::ResetDisabled => {
                ApiError::Conflict(err.to_string())
            }
            ViewError::Form(err) => err.into(),
            ViewError::Store(err) => err.into(),
        }
    }
}
