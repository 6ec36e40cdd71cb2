//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tour_session::{
    api::create_router, AppState, ManualClock, MemoryStorage, PreferenceCache,
};
use tower::ServiceExt;

const T0: u64 = 1_700_000_000_000;

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let cache = PreferenceCache::new(MemoryStorage::new(), clock.clone());
    (create_router(AppState::new(cache)), clock)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request(method, uri, body))
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Preference Endpoint Tests ==

#[tokio::test]
async fn test_preferences_round_trip_keeps_opaque_fields() {
    let (app, _) = create_test_app();
    let lead = json!({
        "id": "lead-A",
        "toured_unit_ids": ["u1"],
        "budget_max": 2400,
        "pets": ["cat"]
    });

    let (status, _) = send(&app, "PUT", "/leads/lead-A/preferences", Some(lead.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", "/leads/lead-A/preferences", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, lead);
}

#[tokio::test]
async fn test_preferences_expire_after_ttl() {
    let (app, clock) = create_test_app();
    send(&app, "PUT", "/leads/lead-A/preferences", Some(json!({"id": "lead-A"}))).await;

    clock.advance(299_999);
    let (status, _) = send(&app, "GET", "/leads/lead-A/preferences", None).await;
    assert_eq!(status, StatusCode::OK);

    clock.advance(2);
    let (status, json) = send(&app, "GET", "/leads/lead-A/preferences", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["expired"], 1);
    assert_eq!(stats["cached_leads"], 0);
}

#[tokio::test]
async fn test_clear_one_lead_keeps_others() {
    let (app, _) = create_test_app();
    send(&app, "PUT", "/leads/lead-A/preferences", Some(json!({"id": "lead-A"}))).await;
    send(&app, "PUT", "/leads/lead-B/preferences", Some(json!({"id": "lead-B", "beds": 2}))).await;

    let (status, json) = send(&app, "DELETE", "/leads/lead-A/preferences", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lead_id"], "lead-A");

    let (status, _) = send(&app, "GET", "/leads/lead-A/preferences", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, json) = send(&app, "GET", "/leads/lead-B/preferences", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["beds"], 2);
}

#[tokio::test]
async fn test_clear_all_preferences() {
    let (app, _) = create_test_app();
    for id in ["lead-A", "lead-B", "lead-C"] {
        send(&app, "PUT", &format!("/leads/{}/preferences", id), Some(json!({"id": id}))).await;
    }

    let (status, _) = send(&app, "DELETE", "/preferences", None).await;
    assert_eq!(status, StatusCode::OK);

    for id in ["lead-A", "lead-B", "lead-C"] {
        let (status, _) = send(&app, "GET", &format!("/leads/{}/preferences", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_put_preferences_id_mismatch() {
    let (app, _) = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/leads/lead-A/preferences",
        Some(json!({"id": "lead-B"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("does not match"));
}

#[tokio::test]
async fn test_invalid_json_request() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/leads/lead-A/preferences")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 400 or 422 for JSON parsing errors
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

// == Tour Endpoint Tests ==

#[tokio::test]
async fn test_tour_session_flow() {
    let (app, _) = create_test_app();

    let (status, json) = send(
        &app,
        "POST",
        "/tours/lead-A",
        Some(json!({"toured_unit_ids": ["u1", "u1", "u3"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["toured_unit_ids"], json!(["u1", "u3"]));

    send(&app, "PUT", "/tours/lead-A/units/u2", None).await;
    send(&app, "PUT", "/tours/lead-A/units/u2", None).await;
    send(&app, "DELETE", "/tours/lead-A/units/u1", None).await;
    let (_, json) = send(&app, "PUT", "/tours/lead-A/units/u1", None).await;
    assert_eq!(json["toured_unit_ids"], json!(["u3", "u2", "u1"]));

    let (status, json) = send(&app, "GET", "/tours/lead-A/units/u2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["toured"], true);

    let (_, json) = send(&app, "GET", "/tours/lead-A/units/u9", None).await;
    assert_eq!(json["toured"], false);

    let (status, json) = send(&app, "GET", "/tours/lead-A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lead_id"], "lead-A");
    assert_eq!(json["toured_unit_ids"], json!(["u3", "u2", "u1"]));
}

#[tokio::test]
async fn test_remove_missing_unit_is_noop() {
    let (app, _) = create_test_app();
    send(&app, "POST", "/tours/lead-A", Some(json!({"toured_unit_ids": ["u1"]}))).await;

    let (status, json) = send(&app, "DELETE", "/tours/lead-A/units/u7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["toured_unit_ids"], json!(["u1"]));
}

#[tokio::test]
async fn test_end_tour_session() {
    let (app, _) = create_test_app();
    send(&app, "POST", "/tours/lead-A", Some(json!({}))).await;
    send(&app, "PUT", "/tours/lead-A/units/u1", None).await;

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["active_tours"], 1);

    let (status, json) = send(&app, "DELETE", "/tours/lead-A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["toured_unit_ids"], json!(["u1"]));

    let (status, _) = send(&app, "GET", "/tours/lead-A", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/tours/lead-A", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tours_are_isolated_per_lead() {
    let (app, _) = create_test_app();
    send(&app, "POST", "/tours/lead-A", Some(json!({}))).await;
    send(&app, "POST", "/tours/lead-B", Some(json!({}))).await;
    send(&app, "PUT", "/tours/lead-A/units/u1", None).await;

    let (_, json) = send(&app, "GET", "/tours/lead-B", None).await;
    assert_eq!(json["toured_unit_ids"], json!([]));
}

#[tokio::test]
async fn test_unit_update_without_session() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "PUT", "/tours/lead-A/units/u1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("lead-A"));
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}
