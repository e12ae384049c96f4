//! Gemini `generateContent` provider.

use super::{GenerationOutcome, ProviderError, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const PROVIDER_NAME: &str = "Gemini";

/// Upper bound on how much of an unexpected payload goes into a log line.
const MAX_LOGGED_PAYLOAD_CHARS: usize = 1000;

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            tracing::error!(
                model = %self.config.model,
                timeout_secs = self.config.timeout.as_secs_f64(),
                "Request to Gemini timed out"
            );
            ProviderError::Timeout(PROVIDER_NAME.to_string())
        } else {
            tracing::error!(model = %self.config.model, error = %err, "Request to Gemini failed");
            ProviderError::NetworkError(err.to_string())
        }
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("X-Goog-Api-Key", self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read Gemini error body"
                    );
                    format!("Failed to read Gemini error body: {}", e)
                }
            };
            tracing::error!(status = status.as_u16(), body = %body, "Gemini API non-success status");
            return Err(ProviderError::Upstream {
                provider: PROVIDER_NAME.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let payload: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ProviderError::InvalidResponse(format!("Gemini returned a non-JSON body: {}", e))
        })?;

        Ok(match extract_text(&payload) {
            Some(text) => GenerationOutcome::Parsed(text),
            None => {
                tracing::warn!(
                    payload = %truncate(&payload.to_string(), MAX_LOGGED_PAYLOAD_CHARS),
                    "Unexpected Gemini JSON structure"
                );
                GenerationOutcome::RawPayload(payload)
            }
        })
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a response payload.
pub fn extract_text(payload: &Value) -> Option<String> {
    let response = GenerateContentResponse::deserialize(payload).ok()?;
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}
