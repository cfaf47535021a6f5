//! HTTP boundary tests for the /parse endpoint.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use vanibill_server::build_router;

async fn post_json(body: Value) -> (StatusCode, Value) {
    let app = build_router();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/parse")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn parse_happy_path() {
    let (status, body) = post_json(json!({
        "transcript": "add 2 dove 200 g",
        "userId": "user-1",
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["action"], json!("add_to_cart"));
    assert_eq!(body["slots"]["name"], json!("dove"));
    assert_eq!(body["slots"]["qty"], json!(2));
    assert_eq!(body["slots"]["size"], json!("200g"));
    assert_eq!(body["raw"]["type"], json!("AddItem"));
}

#[tokio::test]
async fn missing_transcript_is_400() {
    let (status, body) = post_json(json!({ "userId": "user-1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing transcript or userId"));
}

#[tokio::test]
async fn missing_user_id_is_400() {
    let (status, body) = post_json(json!({ "transcript": "upi" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing transcript or userId"));
}

#[tokio::test]
async fn blank_fields_are_400() {
    let (status, _) = post_json(json!({ "transcript": "  ", "userId": "u" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_transcript_still_ok() {
    let (status, body) = post_json(json!({
        "transcript": "12345",
        "userId": "user-1",
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], json!("unknown"));
    assert_eq!(body["raw"]["type"], json!("Unknown"));
}

#[tokio::test]
async fn options_probe_is_204() {
    let app = build_router();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/parse")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn preflight_allows_localhost_origin() {
    let app = build_router();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/parse")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success() || response.status() == StatusCode::NO_CONTENT);
    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .expect("preflight must reflect the origin");
    assert_eq!(allow_origin, "http://localhost:5173");
}
