use crate::models::{FilterQuery, ScholarshipRecord};
use crate::services::{matcher, metrics};
use crate::startup::AppState;
use crate::utils::{FirstValueQuery, JsonBody};
use axum::{extract::State, Extension, Json};
use service_core::error::AppError;
use service_core::middleware::RequestId;

/// `GET /api/scholarships` with criteria as query parameters.
pub async fn search_scholarships(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    FirstValueQuery(query): FirstValueQuery<FilterQuery>,
) -> Result<Json<Vec<ScholarshipRecord>>, AppError> {
    run_search(&state, &request_id, &query).await
}

/// `POST /api/scholarships` with criteria as a JSON body.
pub async fn search_scholarships_json(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(query): JsonBody<FilterQuery>,
) -> Result<Json<Vec<ScholarshipRecord>>, AppError> {
    run_search(&state, &request_id, &query).await
}

async fn run_search(
    state: &AppState,
    request_id: &RequestId,
    query: &FilterQuery,
) -> Result<Json<Vec<ScholarshipRecord>>, AppError> {
    let records = state.scholarships.records().await.map_err(|e| {
        tracing::error!(
            request_id = %request_id.0,
            error = %e,
            "Failed to load scholarship dataset"
        );
        AppError::LoadError {
            resource: "scholarships".to_string(),
            source: anyhow::Error::new(e),
        }
    })?;

    let found = matcher::find_matches(&records, query);

    tracing::info!(
        request_id = %request_id.0,
        criteria = query.active_criteria(),
        scanned = records.len(),
        matched = found.len(),
        "Scholarship search completed"
    );
    metrics::record_scholarship_matches(found.len());

    Ok(Json(found.into_iter().cloned().collect()))
}
