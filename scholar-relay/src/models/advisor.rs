//! Request and response bodies for the Gemini-backed advisor endpoints.

use super::lenient::{list, text};
use serde::{Deserialize, Serialize};

/// `POST /api/admissions`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdmissionsRequest {
    #[serde(deserialize_with = "text")]
    pub college: Option<String>,
    #[serde(deserialize_with = "text")]
    pub gpa: Option<String>,
    #[serde(deserialize_with = "text")]
    pub sat: Option<String>,
    #[serde(deserialize_with = "text")]
    pub extracurriculars: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissionsPrediction {
    pub chance: String,
    pub explanation: String,
    pub recommendations: String,
}

/// `POST /api/essay`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EssayRequest {
    #[serde(alias = "essayText", deserialize_with = "text")]
    pub essay: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EssayReview {
    pub score: u32,
    pub feedback: String,
}

/// `POST /api/resume`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeRequest {
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "text")]
    pub education: Option<String>,
    #[serde(deserialize_with = "list")]
    pub activities: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeDraft {
    pub summary: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
    pub achievements: String,
}

/// One entry of `POST /api/scholarships/suggest`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedScholarship {
    pub name: String,
    pub description: String,
    pub amount: String,
    pub requirements: String,
    pub link: String,
}
