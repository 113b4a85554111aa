//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use bostarter_api::config::ServerConfig;
use bostarter_api::router::build_app_router;
use bostarter_api::state::AppState;
use bostarter_events::EventBus;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

/// Issue a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body and an `x-actor-id` header.
pub async fn post_json_as(
    app: &Router,
    actor_id: i64,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-actor-id", actor_id.to_string())
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body and no actor header.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a POST request with an empty body and an `x-actor-id` header.
pub async fn post_as(app: &Router, actor_id: i64, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-actor-id", actor_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a DELETE request with an `x-actor-id` header.
pub async fn delete_as(app: &Router, actor_id: i64, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("x-actor-id", actor_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Domain fixtures, built through the public API
// ---------------------------------------------------------------------------

/// Register a user and return their id.
pub async fn create_user(app: &Router, username: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/users",
        serde_json::json!({ "username": username, "display_name": username.to_uppercase() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a draft project for `creator_id` with a 30-day deadline.
pub async fn create_project(app: &Router, creator_id: i64, goal: i64) -> i64 {
    let deadline = chrono::Utc::now() + chrono::Duration::days(30);
    let response = post_json_as(
        app,
        creator_id,
        "/api/v1/projects",
        serde_json::json!({
            "title": format!("project-{goal}"),
            "kind": "software",
            "goal_amount": goal,
            "deadline": deadline.to_rfc3339(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Add a reward tier and return its id.
pub async fn add_reward(app: &Router, creator_id: i64, project_id: i64, minimum: i64) -> i64 {
    let response = post_json_as(
        app,
        creator_id,
        &format!("/api/v1/projects/{project_id}/rewards"),
        serde_json::json!({ "title": format!("tier-{minimum}"), "minimum_amount": minimum }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a creator plus an `Open` project with one baseline reward tier.
pub async fn setup_open_project(app: &Router, username: &str, goal: i64) -> (i64, i64) {
    let creator_id = create_user(app, username).await;
    let project_id = create_project(app, creator_id, goal).await;
    add_reward(app, creator_id, project_id, 1).await;
    let response = post_as(app, creator_id, &format!("/api/v1/projects/{project_id}/publish")).await;
    assert_eq!(response.status(), StatusCode::OK);
    (creator_id, project_id)
}
