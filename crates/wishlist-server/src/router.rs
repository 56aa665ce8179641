//! Router assembly for the wishlist HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax. Every intent responds with
/// the freshly rendered view.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/view", get(handlers::view::render_view))
        // Wish list
        .route("/wishes", get(handlers::wishes::list_wishes))
        .route("/wishes/reload", post(handlers::wishes::reload_wishes))
        .route("/wishes/{id}", delete(handlers::wishes::remove_wish))
        .route("/wishes/{id}/select", post(handlers::wishes::select_wish))
        // Form
        .route(
            "/form/fields/{field}",
            post(handlers::form::change_field),
        )
        .route(
            "/form/fields/{field}/blur",
            post(handlers::form::blur_field),
        )
        .route("/form/submit", post(handlers::form::submit))
        .route("/form/reset", post(handlers::form::reset))
        .route("/form/add-new", post(handlers::form::add_new))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
