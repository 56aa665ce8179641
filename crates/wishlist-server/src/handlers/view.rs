//! Render handler.

use axum::extract::State;
use axum::Json;

use crate::schema::view::ViewModel;
use crate::state::AppState;

/// `GET /view`
pub async fn render_view(State(state): State<AppState>) -> Json<ViewModel> {
    Json(state.view.render())
}
