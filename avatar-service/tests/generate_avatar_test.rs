//! Router-level tests for POST /generate-avatar.

mod common;

use avatar_service::config::{DEFAULT_FAILURE_MESSAGE, DEFAULT_PLACEHOLDER_URL};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use common::{router_with_draw, test_config, FAILING_DRAW, SUCCEEDING_DRAW};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tower::util::ServiceExt;

fn generate_request(body: Body) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/generate-avatar")
        .body(body)
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}

#[tokio::test]
async fn success_returns_placeholder_url() {
    let app = router_with_draw(test_config(0), SUCCEEDING_DRAW);

    let response = app.oneshot(generate_request(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        json_body(response).await,
        json!({ "avatarUrl": DEFAULT_PLACEHOLDER_URL })
    );
}

#[tokio::test]
async fn simulated_failure_returns_500_with_message() {
    let app = router_with_draw(test_config(0), FAILING_DRAW);

    let response = app.oneshot(generate_request(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        json_body(response).await,
        json!({ "error": DEFAULT_FAILURE_MESSAGE })
    );
}

#[tokio::test]
async fn request_body_is_ignored() {
    let app = router_with_draw(test_config(0), SUCCEEDING_DRAW);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate-avatar")
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=----avatar",
        )
        .body(Body::from("not really multipart"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn response_waits_for_configured_delay() {
    let app = router_with_draw(test_config(100), SUCCEEDING_DRAW);

    let start = Instant::now();
    let response = app.oneshot(generate_request(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(start.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn configured_strings_are_returned_verbatim() {
    let mut config = test_config(0);
    config.generation.placeholder_url = "https://cdn.example.com/avatar.png".to_string();
    config.generation.failure_message = "try later".to_string();

    let ok = router_with_draw(config.clone(), SUCCEEDING_DRAW)
        .oneshot(generate_request(Body::empty()))
        .await
        .unwrap();
    assert_eq!(
        json_body(ok).await,
        json!({ "avatarUrl": "https://cdn.example.com/avatar.png" })
    );

    let failed = router_with_draw(config, FAILING_DRAW)
        .oneshot(generate_request(Body::empty()))
        .await
        .unwrap();
    assert_eq!(json_body(failed).await, json!({ "error": "try later" }));
}

#[tokio::test]
async fn get_is_not_allowed() {
    let app = router_with_draw(test_config(0), SUCCEEDING_DRAW);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/generate-avatar")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cross_origin_requests_are_allowed_from_any_origin() {
    let app = router_with_draw(test_config(0), SUCCEEDING_DRAW);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate-avatar")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn preflight_is_answered() {
    let app = router_with_draw(test_config(0), SUCCEEDING_DRAW);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/generate-avatar")
        .header(header::ORIGIN, "https://avatars.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn explicit_origin_list_is_enforced() {
    let mut config = test_config(0);
    config.cors.allowed_origins = vec!["https://avatars.example.com".to_string()];

    let allowed = router_with_draw(config.clone(), SUCCEEDING_DRAW)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/generate-avatar")
                .header(header::ORIGIN, "https://avatars.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://avatars.example.com"
    );

    let other = router_with_draw(config, SUCCEEDING_DRAW)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/generate-avatar")
                .header(header::ORIGIN, "https://elsewhere.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(other
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = router_with_draw(test_config(0), FAILING_DRAW);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate-avatar")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}
