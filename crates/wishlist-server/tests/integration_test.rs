//! End-to-end tests for the wishlist HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! WishlistView -> FormController/WishStore -> rendered view.
//!
//! Tests use `tower::ServiceExt::oneshot` to send requests directly to the
//! router without starting a network server, and run on a paused tokio clock
//! so the simulated latencies elapse instantly.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use wishlist_core::WishId;
use wishlist_server::config::ServerConfig;
use wishlist_server::router::build_router;
use wishlist_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Router over a store that has already completed its initial fetch.
async fn loaded_app() -> Router {
    let state = AppState::unloaded(ServerConfig::default());
    state.view.load().await.expect("initial load failed");
    build_router(state)
}

async fn request_json(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    request_json(app, Method::GET, path, None).await
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    request_json(app, Method::POST, path, Some(body)).await
}

async fn post_empty(app: &Router, path: &str) -> (StatusCode, Value) {
    request_json(app, Method::POST, path, None).await
}

async fn delete_json(app: &Router, path: &str) -> (StatusCode, Value) {
    request_json(app, Method::DELETE, path, None).await
}

async fn set_field(app: &Router, field: &str, value: &str) -> Value {
    let (status, body) = post_json(
        app,
        &format!("/form/fields/{field}"),
        json!({ "value": value }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "set {field} failed: {body:?}");
    body
}

fn wish_id(view: &Value, name: &str) -> String {
    view["wishes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["name"] == name)
        .unwrap_or_else(|| panic!("no wish named {name} in {view:?}"))["id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn field_values(view: &Value) -> Vec<String> {
    view["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["value"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_initial_load_shows_loading_then_wishes() {
    let app = build_router(AppState::new(ServerConfig::default()));

    let (status, view) = get_json(&app, "/view").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["loading"], true);
    assert_eq!(view["mode"], "creating");
    assert_eq!(view["wishes"].as_array().unwrap().len(), 0);

    tokio::time::sleep(Duration::from_millis(2100)).await;

    let (_, view) = get_json(&app, "/view").await;
    assert_eq!(view["loading"], false);
    let names: Vec<&str> = view["wishes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["PS5", "Mac-mini"]);
}

#[tokio::test(start_paused = true)]
async fn test_view_renders_field_metadata() {
    let app = loaded_app().await;
    let (_, view) = get_json(&app, "/view").await;

    let fields = view["fields"].as_array().unwrap();
    assert_eq!(fields[0]["name"], "name");
    assert_eq!(fields[0]["label"], "Name");
    assert_eq!(fields[0]["placeholder"], "your wish name");
    assert_eq!(fields[1]["name"], "comment");
    assert_eq!(fields[1]["placeholder"], "any optional comments");
    assert_eq!(view["buttons"], json!({ "submit": false, "reset": false, "add_new": false }));
}

#[tokio::test(start_paused = true)]
async fn test_reload_replaces_collection() {
    let app = loaded_app().await;
    let (_, before) = get_json(&app, "/wishes").await;

    let (status, view) = post_empty(&app, "/wishes/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["wishes"].as_array().unwrap().len(), 2);

    let (_, after) = get_json(&app, "/wishes").await;
    assert_eq!(after["count"], 2);
    assert_ne!(before["wishes"][0]["id"], after["wishes"][0]["id"]);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_create_submit_appends_and_clears_form() {
    let app = loaded_app().await;
    set_field(&app, "name", "PS5").await;
    let view = set_field(&app, "comment", "x").await;
    assert_eq!(view["buttons"]["submit"], true);

    let (status, view) = post_empty(&app, "/form/submit").await;
    assert_eq!(status, StatusCode::OK, "submit failed: {view:?}");
    assert_eq!(view["mode"], "creating");
    assert_eq!(view["submit_succeeded"], true);
    assert_eq!(view["submitting"], false);
    assert_eq!(field_values(&view), vec!["", ""]);

    let (_, list) = get_json(&app, "/wishes").await;
    assert_eq!(list["count"], 3);
    let created = &list["wishes"][2];
    assert_eq!(created["name"], "PS5");
    assert_eq!(created["comment"], "x");
    assert_ne!(created["id"], list["wishes"][0]["id"]);
}

#[tokio::test(start_paused = true)]
async fn test_pristine_submit_is_conflict() {
    let app = loaded_app().await;
    let (status, body) = post_empty(&app, "/form/submit").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_edit_submit_updates_in_place() {
    let app = loaded_app().await;
    let (_, view) = get_json(&app, "/view").await;
    let id = wish_id(&view, "Mac-mini");

    let (status, view) = post_empty(&app, &format!("/wishes/{id}/select")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["mode"], "editing");
    assert_eq!(view["editing"], id.as_str());
    assert_eq!(field_values(&view), vec!["Mac-mini", "at least 2018"]);
    assert_eq!(view["buttons"]["add_new"], true);

    set_field(&app, "comment", "M2 please").await;
    let (status, view) = post_empty(&app, "/form/submit").await;
    assert_eq!(status, StatusCode::OK, "submit failed: {view:?}");
    assert_eq!(view["mode"], "editing");
    assert_eq!(view["editing"], id.as_str());
    assert_eq!(field_values(&view), vec!["Mac-mini", "M2 please"]);

    let (_, list) = get_json(&app, "/wishes").await;
    assert_eq!(list["count"], 2);
    let edited = list["wishes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["id"] == id.as_str())
        .unwrap();
    assert_eq!(edited["name"], "Mac-mini");
    assert_eq!(edited["comment"], "M2 please");
}

#[tokio::test(start_paused = true)]
async fn test_selected_row_is_marked() {
    let app = loaded_app().await;
    let (_, view) = get_json(&app, "/view").await;
    let id = wish_id(&view, "PS5");

    let (_, view) = post_empty(&app, &format!("/wishes/{id}/select")).await;
    let selected: Vec<&Value> = view["wishes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|w| w["selected"] == true)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["id"], id.as_str());
}

#[tokio::test(start_paused = true)]
async fn test_add_new_only_from_edit_mode() {
    let app = loaded_app().await;
    let (status, _) = post_empty(&app, "/form/add-new").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, view) = get_json(&app, "/view").await;
    let id = wish_id(&view, "PS5");
    post_empty(&app, &format!("/wishes/{id}/select")).await;
    set_field(&app, "name", "PS5 Pro").await;

    let (status, view) = post_empty(&app, "/form/add-new").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["mode"], "creating");
    assert_eq!(view["editing"], Value::Null);
    assert_eq!(field_values(&view), vec!["", ""]);
    assert_eq!(view["buttons"]["add_new"], false);
}

#[tokio::test(start_paused = true)]
async fn test_reset_reverts_fields() {
    let app = loaded_app().await;
    let (status, _) = post_empty(&app, "/form/reset").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, view) = get_json(&app, "/view").await;
    let id = wish_id(&view, "PS5");
    post_empty(&app, &format!("/wishes/{id}/select")).await;
    let view = set_field(&app, "name", "Xbox").await;
    assert_eq!(view["buttons"]["reset"], true);

    let (status, view) = post_empty(&app, "/form/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["mode"], "editing");
    assert_eq!(field_values(&view), vec!["PS5", "Not used yet"]);
    assert_eq!(view["buttons"]["reset"], false);
}

#[tokio::test(start_paused = true)]
async fn test_blur_marks_field_touched() {
    let app = loaded_app().await;
    let (status, view) = post_empty(&app, "/form/fields/name/blur").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["fields"][0]["touched"], true);
    assert_eq!(view["fields"][1]["touched"], false);
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_remove_wish() {
    let app = loaded_app().await;
    let (_, view) = get_json(&app, "/view").await;
    let id = wish_id(&view, "PS5");

    let (status, view) = delete_json(&app, &format!("/wishes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["wishes"].as_array().unwrap().len(), 1);

    let (status, body) = delete_json(&app, &format!("/wishes/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test(start_paused = true)]
async fn test_removing_edit_target_returns_to_create_mode() {
    let app = loaded_app().await;
    let (_, view) = get_json(&app, "/view").await;
    let id = wish_id(&view, "Mac-mini");
    post_empty(&app, &format!("/wishes/{id}/select")).await;

    let (status, view) = delete_json(&app, &format!("/wishes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["mode"], "creating");
    assert_eq!(field_values(&view), vec!["", ""]);
}

// ---------------------------------------------------------------------------
// Bad input
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_malformed_and_unknown_ids() {
    let app = loaded_app().await;

    let (status, body) = post_empty(&app, "/wishes/not-a-uuid/select").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let ghost = WishId::new();
    let (status, _) = post_empty(&app, &format!("/wishes/{ghost}/select")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_json(&app, "/wishes/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_field_is_bad_request() {
    let app = loaded_app().await;
    let (status, body) = post_json(&app, "/form/fields/price", json!({ "value": "10" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("price"));
}
