//! HTTP API tests, in-process against the in-memory store.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use oracle_customers::{
    app, AppState, Customer, CustomerStore, CustomerUpdate, MemoryStore, NewCustomer, StoreError,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower::ServiceExt;

// =============================================================================
// Test Helpers
// =============================================================================

fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("web")
}

fn test_app() -> Router {
    app(AppState::new(MemoryStore::new()), &static_dir())
}

/// Store whose database is always down.
struct DownStore;

#[async_trait]
impl CustomerStore for DownStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Internal("connection refused".into()))
    }
    async fn migrate(&self) -> Result<(), StoreError> {
        Err(StoreError::Internal("connection refused".into()))
    }
    async fn list(&self) -> Result<Vec<Customer>, StoreError> {
        Err(StoreError::Internal("connection refused".into()))
    }
    async fn get(&self, _id: i64) -> Result<Customer, StoreError> {
        Err(StoreError::Internal("connection refused".into()))
    }
    async fn create(&self, _new: NewCustomer) -> Result<Customer, StoreError> {
        Err(StoreError::Internal("connection refused".into()))
    }
    async fn update(&self, _id: i64, _change: CustomerUpdate) -> Result<Customer, StoreError> {
        Err(StoreError::Internal("connection refused".into()))
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header("content-type", "application/json");
    }
    let req = req
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let (status, headers, bytes) = send(app, method, uri, body).await;
    assert_eq!(headers["content-type"], "application/json", "{} {}", uri, status);
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn create(app: &Router, name: &str, email: &str) -> (StatusCode, Value) {
    let body = json!({ "name": name, "email": email }).to_string();
    send_json(app, Method::POST, "/api/customers", Some(&body)).await
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn healthz_is_ok_with_empty_store() {
    let app = test_app();
    let (status, body) = send_json(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn healthz_ignores_database_state() {
    let app = oracle_customers::app(AppState::new(DownStore), &static_dir());
    let (status, body) = send_json(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn readyz_reflects_database() {
    let (status, body) = send_json(&test_app(), Method::GET, "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let down = app(AppState::new(DownStore), &static_dir());
    let (status, body) = send_json(&down, Method::GET, "/readyz", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "status": "degraded", "database": "unavailable" }));
}

#[tokio::test]
async fn version_reports_package() {
    let (status, body) = send_json(&test_app(), Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "oracle-customers");
}

// =============================================================================
// Customers
// =============================================================================

#[tokio::test]
async fn list_is_empty_array_before_any_create() {
    let (status, body) = send_json(&test_app(), Method::GET, "/api/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_populated_record() {
    let app = test_app();
    let (status, body) = create(&app, "  Ada Lovelace ", " ada@example.com ").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["email"], "ada@example.com");
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = test_app();
    let (status, _) = create(&app, "First", "same@x.com").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = create(&app, "Second", "same@x.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email already exists");

    let (_, list) = send_json(&app, Method::GET, "/api/customers", None).await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.iter().filter(|c| c["email"] == "same@x.com").count(), 1);
    assert_eq!(rows[0]["name"], "First");
}

#[tokio::test]
async fn whitespace_name_is_rejected_without_insert() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/customers",
        Some(r#"{"name":"  ","email":"a@b.com"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name and email are required");

    let (_, list) = send_json(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_json_is_400_with_error() {
    let app = test_app();
    let (status, body) =
        send_json(&app, Method::POST, "/api/customers", Some(r#"{"name":"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid JSON body");
}

#[tokio::test]
async fn oversized_body_is_400_with_json_error() {
    let app = test_app();
    let body = json!({ "name": "x".repeat(70 * 1024), "email": "big@x.com" }).to_string();

    let (status, json_body) = send_json(&app, Method::POST, "/api/customers", Some(&body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body, json!({ "error": "invalid JSON body" }));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/customers")
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let parsed: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["error"], "invalid JSON body");

    let (_, list) = send_json(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn list_is_ascending_by_id() {
    let app = test_app();
    create(&app, "A", "a@x.com").await;
    create(&app, "B", "b@x.com").await;

    let (status, list) = send_json(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
}

#[tokio::test]
async fn list_failure_is_500() {
    let app = app(AppState::new(DownStore), &static_dir());
    let (status, body) = send_json(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn create_store_failure_is_400() {
    let app = app(AppState::new(DownStore), &static_dir());
    let (status, body) = create(&app, "A", "a@x.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn read_by_id() {
    let app = test_app();
    let (_, created) = create(&app, "A", "a@x.com").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send_json(&app, Method::GET, &format!("/api/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, body) = send_json(&app, Method::GET, "/api/customers/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "customer 999 not found");

    let (status, _) = send_json(&app, Method::GET, "/api/customers/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// CORS and methods
// =============================================================================

#[tokio::test]
async fn preflight_is_204_with_cors_headers() {
    let (status, headers, body) = send(&test_app(), Method::OPTIONS, "/api/customers", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-allow-methods"], "GET,POST,OPTIONS");
}

#[tokio::test]
async fn cors_headers_on_regular_responses() {
    let (_, headers, _) = send(&test_app(), Method::GET, "/api/customers", None).await;
    assert_eq!(headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn other_methods_are_405() {
    let app = test_app();
    for method in [Method::DELETE, Method::PUT, Method::PATCH] {
        let (status, body) = send_json(&app, method.clone(), "/api/customers", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert_eq!(body["error"], "method not allowed");
    }
}

#[tokio::test]
async fn options_outside_customers_is_405_without_cors() {
    let (status, headers, _) = send(&test_app(), Method::OPTIONS, "/healthz", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(headers.get("access-control-allow-origin").is_none());
}

// =============================================================================
// Static files
// =============================================================================

#[tokio::test]
async fn serves_static_index_and_404s_unknown_paths() {
    let app = test_app();
    let (status, _, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("<title>Customers</title>"));

    let (status, _, _) = send(&app, Method::GET, "/missing.js", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
