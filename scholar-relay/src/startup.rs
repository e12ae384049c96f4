//! Router assembly and server lifecycle.

use crate::config::RelayConfig;
use crate::handlers::{
    advisor::{draft_resume, predict_admissions, review_essay, suggest_scholarships},
    chat::relay_prompt,
    health::{health_check, readiness_check},
    metrics::metrics,
    scholarships::{search_scholarships, search_scholarships_json},
};
use crate::services::metrics::{http_metrics_middleware, init_metrics};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{JsonScholarshipStore, ScholarshipStore};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::{handle_panic, AppError};
use service_core::middleware::{
    cors_layer, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Read-only context shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub text_provider: Arc<dyn TextProvider>,
    pub scholarships: Arc<dyn ScholarshipStore>,
}

impl AppState {
    pub fn new(
        config: RelayConfig,
        text_provider: Arc<dyn TextProvider>,
        scholarships: Arc<dyn ScholarshipStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            text_provider,
            scholarships,
        }
    }

    /// Production wiring: Gemini provider and the configured dataset.
    pub fn from_config(config: RelayConfig) -> Result<Self, AppError> {
        let text_provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            api_base: config.gemini.api_base.clone(),
            model: config.gemini.model.clone(),
            timeout: config.gemini.timeout,
        })
        .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        tracing::info!(
            model = %config.gemini.model,
            timeout_secs = config.gemini.timeout.as_secs(),
            "Initialized Gemini text provider"
        );

        let scholarships = match &config.scholarships.path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using scholarship dataset from file");
                JsonScholarshipStore::from_file(path.clone())
            }
            None => {
                tracing::info!("Using bundled scholarship dataset");
                JsonScholarshipStore::bundled()
            }
        };

        Ok(Self::new(config, Arc::new(text_provider), Arc::new(scholarships)))
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .route("/api/chat", post(relay_prompt))
        .route(
            "/api/scholarships",
            get(search_scholarships).post(search_scholarships_json),
        )
        .route("/api/scholarships/suggest", post(suggest_scholarships))
        .route("/api/admissions", post(predict_admissions))
        .route("/api/essay", post(review_essay))
        .route("/api/resume", post(draft_resume))
        // Innermost: a panicking handler still produces a JSON 500
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(http_metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        init_metrics().map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

        let address = config.common.bind_address();
        let state = AppState::from_config(config)?;
        Self::with_state(&address, state).await
    }

    /// Bind `address` and serve the given state. Port 0 picks a free port.
    pub async fn with_state(address: &str, state: AppState) -> Result<Self, AppError> {
        let listener = TcpListener::bind(address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("scholar-relay listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl-C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
