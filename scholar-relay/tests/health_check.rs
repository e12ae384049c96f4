//! Serves the application on a random port and calls it over HTTP.

mod common;

use reqwest::Client;
use scholar_relay::services::metrics::init_metrics;
use scholar_relay::services::providers::mock::MockTextProvider;
use scholar_relay::services::{InMemoryScholarshipStore, JsonScholarshipStore};
use scholar_relay::Application;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app(state: scholar_relay::AppState) -> u16 {
    init_metrics().expect("Failed to initialize metrics");

    let app = Application::with_state("127.0.0.1:0", state)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    port
}

fn bundled_state() -> scholar_relay::AppState {
    common::state_with(
        Arc::new(MockTextProvider::replying("ok")),
        Arc::new(JsonScholarshipStore::bundled()),
    )
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app(bundled_state()).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "scholar-relay");
}

#[tokio::test]
async fn readiness_reflects_dataset_availability() {
    let ready = spawn_app(bundled_state()).await;
    let broken = spawn_app(common::state_with(
        Arc::new(MockTextProvider::replying("ok")),
        Arc::new(JsonScholarshipStore::from_file("/nonexistent/scholarships.json")),
    ))
    .await;
    let client = Client::new();

    let ok = client
        .get(format!("http://127.0.0.1:{}/ready", ready))
        .send()
        .await
        .expect("Failed to send request");
    let unavailable = client
        .get(format!("http://127.0.0.1:{}/ready", broken))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(ok.status(), reqwest::StatusCode::OK);
    assert_eq!(unavailable.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let ready_body: serde_json::Value = ok.json().await.expect("Failed to parse JSON");
    assert_eq!(ready_body["status"], "ready");
    let unavailable_body: serde_json::Value =
        unavailable.json().await.expect("Failed to parse JSON");
    assert_eq!(unavailable_body["error"], "Scholarship dataset unavailable");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let port = spawn_app(common::state_with(
        Arc::new(MockTextProvider::replying("ok")),
        Arc::new(InMemoryScholarshipStore::new(Vec::new())),
    ))
    .await;

    let response = Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("http://127.0.0.1:{}/api/chat", port),
        )
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn metrics_endpoint_exposes_request_counts() {
    let port = spawn_app(bundled_state()).await;
    let client = Client::new();

    client
        .get(format!("http://127.0.0.1:{}/api/scholarships?veteran=true", port))
        .send()
        .await
        .expect("Failed to send request");

    let text = client
        .get(format!("http://127.0.0.1:{}/metrics", port))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(text.contains("http_requests_total"));
    assert!(text.contains("/api/scholarships"));
}
