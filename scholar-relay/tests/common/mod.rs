//! Common test utilities for scholar-relay integration tests.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use scholar_relay::config::RelayConfig;
use scholar_relay::models::ScholarshipRecord;
use scholar_relay::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use scholar_relay::services::providers::mock::MockTextProvider;
use scholar_relay::services::providers::TextProvider;
use scholar_relay::services::{InMemoryScholarshipStore, ScholarshipStore};
use scholar_relay::{build_router, AppState};
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";
pub const GEMINI_PATH: &str = "/models/gemini-2.0-flash:generateContent";

pub fn record(value: Value) -> ScholarshipRecord {
    serde_json::from_value(value).expect("Invalid fixture record")
}

/// Small dataset covering each matching rule.
pub fn fixture_records() -> Vec<ScholarshipRecord> {
    vec![
        record(json!({ "name": "Veterans Fund", "amount": "$5,000", "tags": ["veteran"] })),
        record(json!({ "name": "Service Members Award", "amount": "$2,000", "tags": ["military"] })),
        record(json!({
            "name": "Selective Merit Award",
            "amount": "$10,000",
            "tags": ["first-gen"],
            "minGPA": 3.5
        })),
        record(json!({
            "name": "Engineering Futures",
            "amount": "$3,000",
            "tags": ["female"],
            "majors": ["Mechanical Engineering"]
        })),
        record(json!({
            "name": "Lone Star Grant",
            "amount": "$1,500",
            "tags": ["financial-need"],
            "states": ["texas"]
        })),
        record(json!({
            "name": "Opportunity Scholars",
            "amount": "$4,000",
            "tags": ["underrepresented", "low-income"]
        })),
    ]
}

/// `count` records that all carry the `military` tag.
pub fn numbered_records(count: usize) -> Vec<ScholarshipRecord> {
    (0..count)
        .map(|i| record(json!({ "name": format!("Scholarship {}", i), "tags": ["military"] })))
        .collect()
}

pub fn state_with(
    text_provider: Arc<dyn TextProvider>,
    scholarships: Arc<dyn ScholarshipStore>,
) -> AppState {
    AppState::new(RelayConfig::default(), text_provider, scholarships)
}

pub fn scholarship_app(records: Vec<ScholarshipRecord>) -> Router {
    build_router(state_with(
        Arc::new(MockTextProvider::replying("unused")),
        Arc::new(InMemoryScholarshipStore::new(records)),
    ))
}

pub fn provider_app(provider: Arc<dyn TextProvider>) -> Router {
    build_router(state_with(
        provider,
        Arc::new(InMemoryScholarshipStore::new(Vec::new())),
    ))
}

/// Gemini provider pointed at a local mock server.
pub fn gemini_provider(api_base: &str, timeout: Duration) -> Arc<dyn TextProvider> {
    Arc::new(
        GeminiTextProvider::new(GeminiConfig {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            api_base: api_base.to_string(),
            model: "gemini-2.0-flash".to_string(),
            timeout,
        })
        .expect("Failed to create Gemini provider"),
    )
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Run one request through the router and decode the JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Run one request through the router and return the content type and raw body.
pub async fn send_raw(app: Router, request: Request<Body>) -> (StatusCode, String, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
