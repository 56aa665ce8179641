//! Wish list handlers (list, reload, select, remove).

use axum::extract::{Path, State};
use axum::Json;

use wishlist_core::WishId;

use crate::error::ApiError;
use crate::schema::view::ViewModel;
use crate::schema::wishes::WishListResponse;
use crate::state::AppState;

/// Lists the store's collection.
///
/// `GET /wishes`
pub async fn list_wishes(State(state): State<AppState>) -> Json<WishListResponse> {
    let wishes = state.store.snapshot();
    Json(WishListResponse {
        count: wishes.len(),
        wishes,
    })
}

/// Re-runs the fetch, replacing the collection.
///
/// `POST /wishes/reload`
pub async fn reload_wishes(State(state): State<AppState>) -> Result<Json<ViewModel>, ApiError> {
    state.view.load().await?;
    Ok(Json(state.view.render()))
}

/// Starts editing a wish.
///
/// `POST /wishes/{id}/select`
pub async fn select_wish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewModel>, ApiError> {
    let id: WishId = id.parse()?;
    state.view.select(id)?;
    Ok(Json(state.view.render()))
}

/// Removes a wish after the simulated delay.
///
/// `DELETE /wishes/{id}`
pub async fn remove_wish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewModel>, ApiError> {
    let id: WishId = id.parse()?;
    state.view.remove(id).await?;
    Ok(Json(state.view.render()))
}
