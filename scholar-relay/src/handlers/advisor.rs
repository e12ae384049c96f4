//! Admissions, essay, resume and scholarship advice generated by the text provider.

use crate::models::{
    AdmissionsPrediction, AdmissionsRequest, EssayRequest, EssayReview, FilterQuery, ResumeDraft,
    ResumeRequest, SuggestedScholarship,
};
use crate::services::advisor::{self, parsing, prompts};
use crate::startup::AppState;
use crate::utils::JsonBody;
use axum::{extract::State, Extension, Json};
use service_core::error::AppError;
use service_core::middleware::RequestId;

fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!(message.to_string())))
}

async fn generate(
    state: &AppState,
    request_id: &RequestId,
    feature: &'static str,
    prompt: &str,
) -> Result<String, AppError> {
    let reply = advisor::ask(state.text_provider.as_ref(), feature, prompt).await?;

    tracing::info!(
        request_id = %request_id.0,
        feature,
        prompt_len = prompt.len(),
        reply_len = reply.len(),
        "Advisor reply received"
    );
    Ok(reply)
}

/// `POST /api/admissions`
pub async fn predict_admissions(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(req): JsonBody<AdmissionsRequest>,
) -> Result<Json<AdmissionsPrediction>, AppError> {
    let college = required(&req.college, "No college provided")?;
    let prompt = prompts::admissions(&req, college);

    let reply = generate(&state, &request_id, "admissions", &prompt).await?;
    Ok(Json(parsing::admissions(&reply)))
}

/// `POST /api/essay`
pub async fn review_essay(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(req): JsonBody<EssayRequest>,
) -> Result<Json<EssayReview>, AppError> {
    let essay = required(&req.essay, "No essay provided")?;
    let prompt = prompts::essay(essay);

    let reply = generate(&state, &request_id, "essay", &prompt).await?;
    Ok(Json(parsing::essay(&reply)))
}

/// `POST /api/resume`
pub async fn draft_resume(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(req): JsonBody<ResumeRequest>,
) -> Result<Json<ResumeDraft>, AppError> {
    let name = required(&req.name, "No name provided")?;
    let prompt = prompts::resume(&req, name);

    let reply = generate(&state, &request_id, "resume", &prompt).await?;
    Ok(Json(parsing::resume(&reply, &req)))
}

/// `POST /api/scholarships/suggest`
pub async fn suggest_scholarships(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(query): JsonBody<FilterQuery>,
) -> Result<Json<Vec<SuggestedScholarship>>, AppError> {
    let prompt = prompts::scholarship_suggestions(&query);

    let reply = generate(&state, &request_id, "scholarship_suggestions", &prompt).await?;
    Ok(Json(parsing::scholarships(&reply)))
}
