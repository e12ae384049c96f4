//! Text generation providers.
//!
//! The relay talks to a provider through [`TextProvider`] so handlers can be
//! exercised against [`mock::MockTextProvider`] without network access.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The upstream answered with a non-success status.
    #[error("{provider} API error {status}: {body}")]
    Upstream {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{0} request timed out")]
    Timeout(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    /// A success status with a body that is not JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Upstream { .. } => "upstream_status",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::NetworkError(_) => "network",
            ProviderError::InvalidResponse(_) => "invalid_response",
            ProviderError::NotConfigured(_) => "not_configured",
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream {
                provider,
                status,
                body,
            } => AppError::UpstreamError {
                service: provider,
                status,
                details: body,
            },
            ProviderError::Timeout(provider) => {
                AppError::GatewayTimeout(format!("{} request timed out", provider))
            }
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}

/// Result of a successful upstream call.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// Text found where the response contract puts it.
    Parsed(String),
    /// The response did not have the expected shape; the whole payload.
    RawPayload(Value),
}

#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name used in logs, metrics and error messages.
    fn name(&self) -> &str;

    /// Send `prompt` as the sole content part and return the reply.
    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let response = AppError::from(ProviderError::Timeout("Gemini".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn upstream_status_maps_to_internal_error() {
        let err = ProviderError::Upstream {
            provider: "Gemini".to_string(),
            status: 429,
            body: "quota".to_string(),
        };
        assert_eq!(err.kind(), "upstream_status");
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn network_failure_is_internal() {
        let app_err = AppError::from(ProviderError::NetworkError("refused".to_string()));
        assert!(matches!(app_err, AppError::InternalError(_)));
    }
}
