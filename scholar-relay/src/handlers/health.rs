use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

/// Liveness check.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "scholar-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check: ready once the scholarship dataset can be loaded.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    match state.scholarships.records().await {
        Ok(records) => Ok(Json(json!({
            "status": "ready",
            "scholarships": records.len()
        }))),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            Err(AppError::ServiceUnavailable(
                "Scholarship dataset unavailable".to_string(),
            ))
        }
    }
}
