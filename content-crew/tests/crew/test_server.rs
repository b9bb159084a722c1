//! HTTP endpoint tests, driven through `tower::ServiceExt::oneshot`

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use content_crew::server::router;

use super::common::*;

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/generate-content")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_generate_content_success() {
    let app = router(Arc::new(harness().crew));
    let request = json!({
        "contentType": "social",
        "topic": "Solar panels",
        "targetAudience": "homeowners",
        "tone": "humorous"
    });

    let response = app.oneshot(post_json(request.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["content"], "SEO Specialist output");
    assert_eq!(body["metadata"]["contentType"], "social");
    assert_eq!(body["metadata"]["topic"], "Solar panels");
    assert_eq!(body["metadata"]["targetAudience"], "homeowners");
    assert_eq!(body["metadata"]["tone"], "humorous");

    let timestamp = body["metadata"]["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let app = router(Arc::new(harness().crew));
    let request = json!({ "contentType": "blog", "topic": "Rust" });

    let response = app.oneshot(post_json(request.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("targetAudience"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = router(Arc::new(harness().crew));

    let response = app.oneshot(post_json("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["status"], "error");
}

#[tokio::test]
async fn test_blank_field_is_bad_request() {
    let h = harness();
    let model = h.model.clone();
    let app = router(Arc::new(h.crew));
    let request = json!({
        "contentType": "blog",
        "topic": "Rust",
        "targetAudience": "devs",
        "tone": ""
    });

    let response = app.oneshot(post_json(request.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "'tone' must not be empty"
    );
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_pipeline_failure_is_server_error() {
    let h = harness_with(StubModel::failing_on("Research Specialist"), StubSearch::default());
    let app = router(Arc::new(h.crew));
    let request = json!({
        "contentType": "email",
        "topic": "Spring sale",
        "targetAudience": "customers",
        "tone": "friendly"
    });

    let response = app.oneshot(post_json(request.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("model overloaded"));
}

#[tokio::test]
async fn test_health() {
    let app = router(Arc::new(harness().crew));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let app = router(Arc::new(harness().crew));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/generate-content")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
