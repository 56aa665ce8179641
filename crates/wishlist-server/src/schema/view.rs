//! The rendered view: everything a surface needs to draw the form and list.

use serde::Serialize;

use wishlist_core::WishId;

use crate::form::FieldName;

/// Declarative snapshot of the whole screen.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    /// `"creating"` or `"editing"`.
    pub mode: &'static str,
    /// Id of the wish being edited, if any.
    pub editing: Option<WishId>,
    /// Initial fetch still running.
    pub loading: bool,
    pub submitting: bool,
    pub submit_succeeded: bool,
    /// Last failure to show the user.
    pub error: Option<String>,
    pub fields: Vec<FieldView>,
    pub buttons: ButtonsView,
    pub wishes: Vec<WishView>,
}

/// One input field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: FieldName,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub touched: bool,
    /// Only present once the field has been touched.
    pub error: Option<String>,
    pub disabled: bool,
}

/// Enablement of the three form buttons.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ButtonsView {
    pub submit: bool,
    pub reset: bool,
    pub add_new: bool,
}

/// One row of the wish list.
#[derive(Debug, Clone, Serialize)]
pub struct WishView {
    pub id: WishId,
    pub name: String,
    pub comment: String,
    /// This wish is the current editing target.
    pub selected: bool,
}
