use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("{service} API error {status}")]
    UpstreamError {
        service: String,
        status: u16,
        details: String,
    },

    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Failed to load {resource}: {source}")]
    LoadError {
        resource: String,
        source: anyhow::Error,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: None,
            details: None,
            trace: None,
        }
    }

    fn diagnostic(error: impl Into<String>, err: &anyhow::Error) -> Self {
        Self {
            error: error.into(),
            status: None,
            details: Some(err.to_string()),
            trace: Some(format!("{:?}", err)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(err) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::message(err.to_string()))
            }
            AppError::UpstreamError {
                service,
                status,
                details,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: format!("{} API error", service),
                    status: Some(status),
                    details: Some(details),
                    trace: None,
                },
            ),
            AppError::GatewayTimeout(msg) => {
                (StatusCode::GATEWAY_TIMEOUT, ErrorResponse::message(msg))
            }
            AppError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::message(msg))
            }
            AppError::LoadError { resource, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::diagnostic(format!("Failed to load {}", resource), &source),
            ),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::diagnostic("Internal server error", &err),
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::diagnostic("Configuration error", &err),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Converts a handler panic into the same 500 body as [`AppError::InternalError`].
///
/// Intended for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %message, "Request handler panicked");

    AppError::InternalError(anyhow::anyhow!("handler panicked: {}", message)).into_response()
}
