//! Request and dataset types.

pub mod advisor;
mod lenient;
pub mod query;
pub mod scholarship;

pub use advisor::{
    AdmissionsPrediction, AdmissionsRequest, EssayRequest, EssayReview, ResumeDraft,
    ResumeRequest, SuggestedScholarship,
};
pub use query::FilterQuery;
pub use scholarship::ScholarshipRecord;
