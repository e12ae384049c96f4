pub mod advisor;
pub mod catalog;
pub mod matcher;
pub mod metrics;
pub mod providers;

pub use catalog::{InMemoryScholarshipStore, JsonScholarshipStore, ScholarshipStore};
