//! HTTP Route Tests
//!
//! Drives the full router (CORS, tracing, `/api` nesting) with
//! `tower::ServiceExt::oneshot` and checks status codes and JSON bodies.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use request_tracker::http_server::{HttpServer, HttpServerConfig};
use request_tracker::{InMemoryRequestStore, RequestService};

// =============================================================================
// Helper Functions
// =============================================================================

fn app(page_size: usize) -> Router {
    let service = RequestService::with_page_size(Arc::new(InMemoryRequestStore::new()), page_size);
    HttpServer::with_service(HttpServerConfig::default(), service).router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::PUT,
        "/api/request",
        Some(json!({"requestorName": name, "itemRequested": "Lantern"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["request"]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = app(10);
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_returns_created_envelope() {
    let app = app(10);
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/request",
        Some(json!({
            "requestorName": "Alice",
            "itemRequested": "Lantern",
            "createdDate": "2001-01-01T00:00:00Z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Created");
    let request = &body["data"]["request"];
    assert_eq!(request["requestorName"], "Alice");
    assert_eq!(request["status"], "pending");
    assert!(request["lastEditedDate"].is_null());
    assert!(!request["createdDate"].as_str().unwrap().starts_with("2001"));
}

#[tokio::test]
async fn test_create_validation_error() {
    let app = app(10);
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/request",
        Some(json!({"requestorName": "Al", "itemRequested": "Lantern"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "VALIDATION_ERROR");
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("requestorName"));
}

#[tokio::test]
async fn test_create_mistyped_field_is_validation_error() {
    let app = app(10);
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/request",
        Some(json!({"requestorName": 123, "itemRequested": "Lantern"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("requestorName"));
}

#[tokio::test]
async fn test_malformed_json_is_invalid_input() {
    let app = app(10);
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/request")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "INVALID_INPUT_ERROR");
}

#[tokio::test]
async fn test_list_pages() {
    let app = app(2);
    for name in ["Ann", "Ben", "Cat"] {
        create(&app, name).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/request?page=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["page"], 1);
    assert_eq!(data["pageSize"], 2);
    assert_eq!(data["totalRequests"], 3);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["records"][0]["requestorName"], "Cat");
    assert_eq!(data["records"][1]["requestorName"], "Ben");

    let (status, body) = send(&app, Method::GET, "/api/request?page=9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["records"], json!([]));
    assert_eq!(body["data"]["totalRequests"], 3);
}

#[tokio::test]
async fn test_list_page_beyond_integer_range_is_empty() {
    let app = app(10);
    create(&app, "Ann").await;

    let (status, body) = send(&app, Method::GET, "/api/request?page=99999999999999999999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["records"], json!([]));
    assert_eq!(body["data"]["totalRequests"], 1);
    assert_eq!(body["data"]["totalPages"], 1);
}

#[tokio::test]
async fn test_list_invalid_page() {
    let app = app(10);
    for uri in ["/api/request?page=0", "/api/request?page=abc", "/api/request"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["kind"], "INVALID_PAGINATION_ERROR", "{}", uri);
    }
}

#[tokio::test]
async fn test_update_flow() {
    let app = app(10);
    let id = create(&app, "Alice").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/request",
        Some(json!({"id": id, "status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updatedRequest"]["status"], "approved");
    assert!(body["data"]["updatedRequest"]["lastEditedDate"].is_string());

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/request",
        Some(json!({"id": id, "status": "bogus"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_STATUS_ERROR");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/request",
        Some(json!({"id": "missing", "status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NOT_FOUND_ERROR");

    let (status, body) = send(&app, Method::PATCH, "/api/request", Some(json!({"id": id}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_INPUT_ERROR");
}

#[tokio::test]
async fn test_batch_edit_reports_partial_progress() {
    let app = app(10);
    let id1 = create(&app, "Ann").await;
    let id2 = create(&app, "Ben").await;
    let id3 = create(&app, "Cat").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/requests/edit",
        Some(json!({"updates": [
            {"id": id1, "status": "approved"},
            {"id": id2, "status": "bogus"},
            {"id": id3, "status": "completed"}
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_STATUS_ERROR");
    assert_eq!(body["applied"], 1);
    assert_eq!(body["failedIndex"], 1);

    let (_, body) = send(&app, Method::GET, "/api/request?page=1&status=approved", None).await;
    assert_eq!(body["data"]["totalRequests"], 1);
    assert_eq!(body["data"]["records"][0]["id"], id1.as_str());

    let (_, body) = send(&app, Method::GET, "/api/request?page=1&status=completed", None).await;
    assert_eq!(body["data"]["totalRequests"], 0);
}

#[tokio::test]
async fn test_batch_edit_non_string_status_keeps_earlier_items() {
    let app = app(10);
    let id1 = create(&app, "Ann").await;
    let id2 = create(&app, "Ben").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/requests/edit",
        Some(json!({"updates": [
            {"id": id1, "status": "approved"},
            {"id": id2, "status": 5}
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_STATUS_ERROR");
    assert_eq!(body["applied"], 1);
    assert_eq!(body["failedIndex"], 1);

    let (_, body) = send(&app, Method::GET, "/api/request?page=1&status=approved", None).await;
    assert_eq!(body["data"]["totalRequests"], 1);
    assert_eq!(body["data"]["records"][0]["id"], id1.as_str());
}

#[tokio::test]
async fn test_blank_status_is_invalid_input_on_both_update_paths() {
    let app = app(10);
    let id = create(&app, "Ann").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/request",
        Some(json!({"id": id, "status": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_INPUT_ERROR");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/requests/edit",
        Some(json!({"updates": [{"id": id, "status": "   "}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_INPUT_ERROR");
    assert_eq!(body["failedIndex"], 0);
}

#[tokio::test]
async fn test_batch_edit_success_and_missing_list() {
    let app = app(10);
    let id = create(&app, "Ann").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/requests/edit",
        Some(json!({"updates": [{"id": id, "status": "completed"}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], 1);

    let (status, body) = send(&app, Method::PATCH, "/api/requests/edit", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_INPUT_ERROR");
}

#[tokio::test]
async fn test_batch_delete() {
    let app = app(10);
    let id1 = create(&app, "Ann").await;
    let id2 = create(&app, "Ben").await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/requests",
        Some(json!({"deletions": [id1, id2]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], 2);

    let (_, body) = send(&app, Method::GET, "/api/request?page=1", None).await;
    assert_eq!(body["data"]["totalRequests"], 0);

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/requests",
        Some(json!({"deletions": [id1]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, "/api/requests", Some(json!({"deletions": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_INPUT_ERROR");
}
