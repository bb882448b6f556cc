//! Integration Tests for Admin API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use memo_server::admission::AdmissionController;
use memo_server::api::create_router;
use memo_server::cache::{CacheStore, ManualClock};
use memo_server::{AppState, RequestProcessor, UppercaseCompute};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let processor = RequestProcessor::new(
        CacheStore::new(100, Duration::from_secs(60)).unwrap(),
        AdmissionController::new(2).unwrap(),
        Arc::new(UppercaseCompute::new(Duration::ZERO)),
    );
    create_router(AppState::new(processor))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn process_request(key: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "key": key }).to_string()))
        .unwrap()
}

fn stats_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/stats")
        .body(Body::empty())
        .unwrap()
}

// == PROCESS Endpoint Tests ==

#[tokio::test]
async fn test_process_endpoint_miss_then_hit() {
    let app = create_test_app();

    let response = app.clone().oneshot(process_request("hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "hello");
    assert_eq!(json["value"], "Processed: HELLO");
    assert_eq!(json["cached"], false);

    let response = app.oneshot(process_request("hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], "Processed: HELLO");
    assert_eq!(json["cached"], true);
}

#[tokio::test]
async fn test_process_endpoint_expired_entry_recomputes() {
    let clock = Arc::new(ManualClock::new(0));
    let processor = RequestProcessor::new(
        CacheStore::with_clock(10, Duration::from_millis(1000), clock.clone()).unwrap(),
        AdmissionController::new(1).unwrap(),
        Arc::new(UppercaseCompute::new(Duration::ZERO)),
    );
    let app = create_router(AppState::new(processor));

    app.clone().oneshot(process_request("ttl")).await.unwrap();

    clock.set(500);
    let response = app.clone().oneshot(process_request("ttl")).await.unwrap();
    assert_eq!(body_to_json(response.into_body()).await["cached"], true);

    clock.set(1500);
    let response = app.clone().oneshot(process_request("ttl")).await.unwrap();
    assert_eq!(body_to_json(response.into_body()).await["cached"], false);

    let response = app.oneshot(stats_request()).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cache"]["expired"], 1);
    assert_eq!(json["cache"]["total_entries"], 1);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_initial() {
    let app = create_test_app();

    let response = app.oneshot(stats_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cache"]["hits"], 0);
    assert_eq!(json["cache"]["misses"], 0);
    assert_eq!(json["cache"]["evictions"], 0);
    assert_eq!(json["cache"]["total_entries"], 0);
    assert_eq!(json["cache"]["capacity"], 100);
    assert_eq!(json["cache"]["hit_rate"], 0.0);
    assert_eq!(json["admission"]["limit"], 2);
    assert_eq!(json["admission"]["available"], 2);
    assert_eq!(json["admission"]["in_flight"], 0);
}

#[tokio::test]
async fn test_stats_after_eviction() {
    let processor = RequestProcessor::new(
        CacheStore::new(2, Duration::from_secs(60)).unwrap(),
        AdmissionController::new(1).unwrap(),
        Arc::new(UppercaseCompute::new(Duration::ZERO)),
    );
    let app = create_router(AppState::new(processor));

    for key in ["a", "b", "c", "c"] {
        let response = app.clone().oneshot(process_request(key)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(stats_request()).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cache"]["hits"], 1);
    assert_eq!(json["cache"]["misses"], 3);
    assert_eq!(json["cache"]["evictions"], 1);
    assert_eq!(json["cache"]["total_entries"], 2);
    assert_eq!(json["admission"]["total_admitted"], 3);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 400/422 for JSON parsing errors by default
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app();

    let response = app.oneshot(process_request("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_closed_admission_returns_unavailable() {
    let processor = RequestProcessor::new(
        CacheStore::new(10, Duration::from_secs(60)).unwrap(),
        AdmissionController::new(1).unwrap(),
        Arc::new(UppercaseCompute::new(Duration::ZERO)),
    );
    processor.admission().close();
    let app = create_router(AppState::new(processor));

    let response = app.oneshot(process_request("late")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}
