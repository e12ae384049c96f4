//! Gemini-backed admissions, essay, resume and scholarship advice.
//!
//! Each feature renders a prompt that asks for labelled sections, sends it
//! through the [`TextProvider`] and parses the reply. A section missing from
//! the reply falls back to a default instead of failing the request.

pub mod parsing;
pub mod prompts;

use super::metrics;
use super::providers::{GenerationOutcome, ProviderError, TextProvider};
use std::time::Instant;

/// Send `prompt` and return the reply text.
///
/// A reply without text is an error here: there is nothing to parse.
pub async fn ask(
    provider: &dyn TextProvider,
    feature: &'static str,
    prompt: &str,
) -> Result<String, ProviderError> {
    let started = Instant::now();
    let result = provider.generate(prompt).await;
    let elapsed = started.elapsed().as_secs_f64();

    let err = match result {
        Ok(GenerationOutcome::Parsed(text)) => {
            metrics::record_upstream_call(provider.name(), feature, "parsed", elapsed);
            return Ok(text);
        }
        Ok(GenerationOutcome::RawPayload(_)) => {
            metrics::record_upstream_call(provider.name(), feature, "raw", elapsed);
            ProviderError::InvalidResponse(format!(
                "{} response contained no text",
                provider.name()
            ))
        }
        Err(e) => {
            metrics::record_upstream_call(provider.name(), feature, "error", elapsed);
            e
        }
    };

    metrics::record_upstream_error(provider.name(), err.kind());
    tracing::error!(provider = provider.name(), feature, error = %err, "Advisor request failed");
    Err(err)
}
