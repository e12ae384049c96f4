use crate::services::metrics;
use crate::services::providers::GenerationOutcome;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Extension, Json};
use serde::Serialize;
use serde_json::Value;
use service_core::error::AppError;
use service_core::middleware::RequestId;
use std::time::Instant;

/// Body returned by `POST /api/chat` on success.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatResponse {
    Result(String),
    ResultRaw(Value),
}

impl From<GenerationOutcome> for ChatResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Parsed(text) => ChatResponse::Result(text),
            GenerationOutcome::RawPayload(payload) => ChatResponse::ResultRaw(payload),
        }
    }
}

/// Relay a prompt to the text provider.
///
/// The body is read as raw bytes so a missing or malformed body is answered
/// with a 400 in the same error shape as every other failure.
pub async fn relay_prompt(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let prompt = extract_prompt(&body)?;

    let provider = state.text_provider.name().to_string();
    let started = Instant::now();
    let result = state.text_provider.generate(&prompt).await;
    let elapsed = started.elapsed().as_secs_f64();

    match result {
        Ok(outcome) => {
            let label = match &outcome {
                GenerationOutcome::Parsed(_) => "parsed",
                GenerationOutcome::RawPayload(_) => "raw",
            };
            metrics::record_upstream_call(&provider, "chat", label, elapsed);
            tracing::info!(
                request_id = %request_id.0,
                provider = %provider,
                outcome = label,
                prompt_len = prompt.len(),
                elapsed_ms = (elapsed * 1000.0) as u64,
                "Prompt relayed"
            );
            Ok(Json(outcome.into()))
        }
        Err(e) => {
            metrics::record_upstream_call(&provider, "chat", "error", elapsed);
            metrics::record_upstream_error(&provider, e.kind());
            tracing::error!(
                request_id = %request_id.0,
                provider = %provider,
                error = %e,
                "Prompt relay failed"
            );
            Err(e.into())
        }
    }
}

fn extract_prompt(body: &[u8]) -> Result<String, AppError> {
    let no_prompt = || AppError::BadRequest(anyhow::anyhow!("No prompt provided"));

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(no_prompt());
    }

    let payload: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected malformed chat request body");
        AppError::BadRequest(anyhow::anyhow!("Malformed JSON body"))
    })?;

    payload
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .ok_or_else(no_prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rejection(body: &[u8]) -> String {
        match extract_prompt(body) {
            Err(AppError::BadRequest(e)) => e.to_string(),
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn prompt_is_extracted() {
        assert_eq!(extract_prompt(br#"{"prompt":"hi"}"#).unwrap(), "hi");
    }

    #[test]
    fn missing_or_empty_prompt_is_rejected() {
        assert_eq!(rejection(b""), "No prompt provided");
        assert_eq!(rejection(b"{}"), "No prompt provided");
        assert_eq!(rejection(br#"{"prompt":""}"#), "No prompt provided");
        assert_eq!(rejection(br#"{"prompt":42}"#), "No prompt provided");
        assert_eq!(rejection(b"null"), "No prompt provided");
    }

    #[test]
    fn malformed_body_is_rejected() {
        assert_eq!(rejection(b"{prompt:"), "Malformed JSON body");
    }

    #[test]
    fn response_shapes() {
        assert_eq!(
            serde_json::to_value(ChatResponse::from(GenerationOutcome::Parsed("x".into()))).unwrap(),
            json!({ "result": "x" })
        );
        assert_eq!(
            serde_json::to_value(ChatResponse::from(GenerationOutcome::RawPayload(json!({ "a": 1 }))))
                .unwrap(),
            json!({ "result_raw": { "a": 1 } })
        );
    }
}
