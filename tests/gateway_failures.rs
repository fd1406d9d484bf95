//! Failure paths: short-circuits, missing configuration, unreachable upstream.

use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::IntoResponse;
use booking_gateway::GatewayConfig;
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_options_never_reaches_backend() {
    let (backend, capture) = common::start_recording_backend(|_| "unexpected".into_response()).await;
    let (gateway, shutdown) = common::start_gateway(common::config_for(&format!("http://{}", backend))).await;

    let res = common::client()
        .request(reqwest::Method::OPTIONS, format!("http://{}/api/auth/login", gateway))
        .header("origin", "https://site.example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await.unwrap().is_empty());
    assert_eq!(capture.count(), 0, "preflight must not call upstream");

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_backend_returns_json_500() {
    let (gateway, shutdown) = common::start_gateway(GatewayConfig::default()).await;

    for method in [reqwest::Method::GET, reqwest::Method::POST, reqwest::Method::PATCH] {
        let res = common::client()
            .request(method.clone(), format!("http://{}/api/bookings", gateway))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", method);
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "BACKEND_URL is not configured");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_is_up_without_backend() {
    let (gateway, shutdown) = common::start_gateway(GatewayConfig::default()).await;

    let res = common::client()
        .get(format!("http://{}/healthz", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["backend_configured"], false);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    let dead = common::closed_port().await;
    let (gateway, shutdown) = common::start_gateway(common::config_for(&format!("http://{}", dead))).await;

    let res = common::client()
        .get(format!("http://{}/api/vehicles", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "upstream request failed");

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_body_is_rejected_before_forwarding() {
    let (backend, capture) = common::start_recording_backend(|_| "unexpected".into_response()).await;
    let mut config = common::config_for(&format!("http://{}", backend));
    config.limits.max_body_size = 64;
    let (gateway, shutdown) = common::start_gateway(config).await;

    let res = common::client()
        .post(format!("http://{}/api/uploads", gateway))
        .body(vec![b'a'; 1024])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(capture.count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_deadline_is_json_gateway_timeout() {
    let backend = common::start_stalled_backend(Duration::from_secs(3)).await;
    let mut config = common::config_for(&format!("http://{}", backend));
    config.timeouts.request_secs = 1;
    let (gateway, shutdown) = common::start_gateway(config).await;

    let res = common::client()
        .get(format!("http://{}/api/quotes", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "upstream request timed out");

    shutdown.trigger();
}
