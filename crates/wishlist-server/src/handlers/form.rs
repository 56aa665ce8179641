//! Form handlers (change, blur, submit, reset, add new).

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::form::FieldName;
use crate::schema::form::ChangeFieldRequest;
use crate::schema::view::ViewModel;
use crate::state::AppState;

/// `POST /form/fields/{field}`
pub async fn change_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(req): Json<ChangeFieldRequest>,
) -> Result<Json<ViewModel>, ApiError> {
    let field: FieldName = field.parse()?;
    state.view.change_field(field, req.value)?;
    Ok(Json(state.view.render()))
}

/// `POST /form/fields/{field}/blur`
pub async fn blur_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<ViewModel>, ApiError> {
    let field: FieldName = field.parse()?;
    state.view.blur_field(field)?;
    Ok(Json(state.view.render()))
}

/// Submits the form and responds once the store mutation has committed.
///
/// `POST /form/submit`
pub async fn submit(State(state): State<AppState>) -> Result<Json<ViewModel>, ApiError> {
    state.view.submit().await?;
    Ok(Json(state.view.render()))
}

/// `POST /form/reset`
pub async fn reset(State(state): State<AppState>) -> Result<Json<ViewModel>, ApiError> {
    state.view.reset()?;
    Ok(Json(state.view.render()))
}

/// `POST /form/add-new`
pub async fn add_new(State(state): State<AppState>) -> Result<Json<ViewModel>, ApiError> {
    state.view.add_new()?;
    Ok(Json(state.view.render()))
}
