//! Read-only access to the scholarship dataset.

use crate::models::ScholarshipRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Dataset compiled into the binary, used when no file is configured.
const BUNDLED_DATASET: &str = include_str!("../../data/scholarships.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset is not a JSON array of scholarship records: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of scholarship records. The records never change once loaded.
#[async_trait]
pub trait ScholarshipStore: Send + Sync {
    async fn records(&self) -> Result<Arc<[ScholarshipRecord]>, CatalogError>;
}

#[derive(Debug, Clone)]
pub enum DatasetSource {
    Bundled,
    File(PathBuf),
}

/// JSON-backed store. Parses on first use and keeps the result; a failed load
/// is retried on the next request.
pub struct JsonScholarshipStore {
    source: DatasetSource,
    cache: OnceCell<Arc<[ScholarshipRecord]>>,
}

impl JsonScholarshipStore {
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    pub fn bundled() -> Self {
        Self::new(DatasetSource::Bundled)
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(DatasetSource::File(path.into()))
    }

    async fn load(&self) -> Result<Arc<[ScholarshipRecord]>, CatalogError> {
        let records = match &self.source {
            DatasetSource::Bundled => parse_records(BUNDLED_DATASET)?,
            DatasetSource::File(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Read {
                        path: path.clone(),
                        source,
                    })?;
                parse_records(&raw)?
            }
        };

        tracing::info!(
            source = ?self.source,
            count = records.len(),
            "Loaded scholarship dataset"
        );

        Ok(records.into())
    }
}

#[async_trait]
impl ScholarshipStore for JsonScholarshipStore {
    async fn records(&self) -> Result<Arc<[ScholarshipRecord]>, CatalogError> {
        self.cache
            .get_or_try_init(|| self.load())
            .await
            .map(Arc::clone)
    }
}

/// Fixed set of records held in memory.
pub struct InMemoryScholarshipStore {
    records: Arc<[ScholarshipRecord]>,
}

impl InMemoryScholarshipStore {
    pub fn new(records: Vec<ScholarshipRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

#[async_trait]
impl ScholarshipStore for InMemoryScholarshipStore {
    async fn records(&self) -> Result<Arc<[ScholarshipRecord]>, CatalogError> {
        Ok(Arc::clone(&self.records))
    }
}

pub fn parse_records(raw: &str) -> Result<Vec<ScholarshipRecord>, CatalogError> {
    Ok(serde_json::from_str(raw)?)
}
