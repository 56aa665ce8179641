//! Schema types for form intents.

use serde::{Deserialize, Serialize};

use crate::form::FieldName;

/// Request to set a field's value.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeFieldRequest {
    #[serde(default)]
    pub value: String,
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrorView {
    pub field: FieldName,
    pub message: String,
}
