//! API surface tests for the reference application, driven through the
//! framework's axum service without a socket. Only read paths and rejected
//! writes are exercised here; store behavior itself is covered by the unit
//! tests next to the store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use solidus::{App, Registry};
use solidus_server::routes;
use tower::ServiceExt;

fn api() -> axum::Router {
    let registry = Registry::new();
    routes::register_all(&registry).unwrap();

    let mut app = App::new();
    // Sites captured by file!() are workspace-relative; so is this root.
    app.load_routes(&registry, "crates/solidus-server/src/routes")
        .unwrap();
    app.into_service()
}

async fn send(service: axum::Router, method: &str, uri: &str, body: &str) -> Response {
    service
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_all_routes_load() {
    let registry = Registry::new();
    routes::register_all(&registry).unwrap();

    let mut app = App::new();
    app.load_routes(&registry, "crates/solidus-server/src/routes")
        .unwrap();
    assert_eq!(app.route_count(), 6);
}

#[tokio::test]
async fn test_index_says_hello() {
    let response = send(api(), "GET", "/", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "hello from example route" })
    );
}

#[tokio::test]
async fn test_unknown_path_is_route_not_found() {
    let response = send(api(), "GET", "/nope", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "route_not_found" }));
}

#[tokio::test]
async fn test_user_list_is_a_json_array() {
    let response = send(api(), "GET", "/users", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.is_array());
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let response = send(api(), "GET", "/users/abc", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "invalid user id" }));
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let response = send(api(), "GET", "/users/424242", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "user not found" }));
}

#[tokio::test]
async fn test_invalid_create_payload_is_rejected() {
    let response = send(api(), "POST", "/users", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "invalid user payload" })
    );
}

#[tokio::test]
async fn test_create_without_email_fails_validation() {
    let response = send(api(), "POST", "/users", r#"{ "name": "Ana" }"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "email is required" }));
}
