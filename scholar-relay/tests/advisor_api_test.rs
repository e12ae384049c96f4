//! Admissions, essay, resume and scholarship suggestion endpoints.

mod common;

use axum::http::StatusCode;
use common::{gemini_provider, post_json, provider_app, send, GEMINI_PATH};
use scholar_relay::services::providers::mock::{MockReply, MockTextProvider};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn admissions_reply_is_split_into_sections() {
    let provider = Arc::new(MockTextProvider::replying(
        "CHANCE: 42%\nEXPLANATION: Solid grades.\nRECOMMENDATIONS: Apply early.",
    ));

    let (status, body) = send(
        provider_app(provider.clone()),
        post_json(
            "/api/admissions",
            r#"{"college":"Rice University","gpa":3.8,"sat":"1450"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "chance": "42%",
            "explanation": "Solid grades.",
            "recommendations": "Apply early."
        })
    );
    let prompt = &provider.prompts()[0];
    assert!(prompt.contains("Rice University"));
    assert!(prompt.contains("- SAT score: 1450"));
}

#[tokio::test]
async fn admissions_without_college_is_rejected() {
    let provider = Arc::new(MockTextProvider::replying("unused"));

    let (status, body) = send(
        provider_app(provider.clone()),
        post_json("/api/admissions", r#"{"college":"  ","gpa":3.8}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No college provided" }));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn essay_review_defaults_missing_score() {
    let provider = Arc::new(MockTextProvider::replying("FEEDBACK: Vivid opening."));

    let (status, body) = send(
        provider_app(provider),
        post_json("/api/essay", r#"{"essayText":"The summer I rebuilt a bike..."}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "score": 7, "feedback": "Vivid opening." }));
}

#[tokio::test]
async fn empty_essay_is_rejected() {
    let (status, body) = send(
        provider_app(Arc::new(MockTextProvider::replying("unused"))),
        post_json("/api/essay", r#"{"essay":""}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No essay provided");
}

#[tokio::test]
async fn resume_falls_back_to_submitted_activities() {
    let provider = Arc::new(MockTextProvider::replying(
        "SUMMARY: Curious engineer.\nSKILLS: Python, CAD",
    ));

    let (status, body) = send(
        provider_app(provider),
        post_json(
            "/api/resume",
            r#"{"name":"Ada Park","email":"ada@example.com","education":"Lincoln High",
                "activities":["Robotics captain","Math tutor"]}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Curious engineer.");
    assert_eq!(body["education"], "Lincoln High");
    assert_eq!(body["experience"], "• Robotics captain\n• Math tutor");
    assert_eq!(body["skills"], "Python, CAD");
    assert_eq!(body["achievements"], "Awards and recognitions");
}

#[tokio::test]
async fn suggested_scholarships_are_parsed_from_blocks() {
    let provider = Arc::new(MockTextProvider::replying(
        "SCHOLARSHIP 1:\nNAME: Coca-Cola Scholars\nAMOUNT: $20,000\n\
         SCHOLARSHIP 2:\nNAME: QuestBridge\nLINK: https://questbridge.test\n",
    ));

    let (status, body) = send(
        provider_app(provider.clone()),
        post_json("/api/scholarships/suggest", r#"{"firstGen":true,"state":"Ohio"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["name"], "Coca-Cola Scholars");
    assert_eq!(body[0]["amount"], "$20,000");
    assert_eq!(body[0]["link"], "#");
    assert_eq!(body[1]["description"], "Details not available");
    assert!(provider.prompts()[0].contains("- First Generation: Yes"));
}

#[tokio::test]
async fn upstream_status_is_echoed() {
    let provider = Arc::new(MockTextProvider::new(MockReply::Status(
        429,
        "quota exceeded".to_string(),
    )));

    let (status, body) = send(
        provider_app(provider),
        post_json("/api/essay", r#"{"essay":"text"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Mock API error");
    assert_eq!(body["status"], 429);
    assert_eq!(body["details"], "quota exceeded");
}

#[tokio::test]
async fn reply_without_text_is_an_internal_error() {
    let provider = Arc::new(MockTextProvider::new(MockReply::Raw(json!({
        "promptFeedback": { "blockReason": "SAFETY" }
    }))));

    let (status, body) = send(
        provider_app(provider),
        post_json("/api/admissions", r#"{"college":"MIT"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().unwrap().contains("no text"));
}

#[tokio::test]
async fn essay_is_sent_to_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(body_string_contains("The summer I rebuilt a bike"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "SCORE: 8\nFEEDBACK: Specific and warm." }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = provider_app(gemini_provider(&server.uri(), Duration::from_secs(5)));
    let (status, body) = send(
        app,
        post_json("/api/essay", r#"{"essay":"The summer I rebuilt a bike"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "score": 8, "feedback": "Specific and warm." }));
}

#[tokio::test]
async fn malformed_body_is_a_json_bad_request() {
    let (status, body) = send(
        provider_app(Arc::new(MockTextProvider::replying("unused"))),
        post_json("/api/resume", "{name:"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Malformed JSON body" }));
}
