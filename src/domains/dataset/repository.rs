use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, error};

use crate::domains::donation::RawDonation;
use crate::errors::{DataLoadError, DataLoadResult};

/// Source of the authoritative historical record set.
///
/// The core never retries or synthesizes data itself; on failure the caller
/// decides whether to supply a fallback dataset through
/// `DashboardService::load_dataset`.
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    async fn load(&self) -> DataLoadResult<Vec<RawDonation>>;
}

/// Loads the dataset from a JSON file: an array of raw donation objects.
pub struct JsonDatasetRepository {
    path: PathBuf,
}

impl JsonDatasetRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetRepository for JsonDatasetRepository {
    async fn load(&self) -> DataLoadResult<Vec<RawDonation>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            error!("Failed to read dataset file {}: {}", self.path.display(), e);
            DataLoadError::Io(e)
        })?;

        let records: Vec<RawDonation> = serde_json::from_slice(&bytes).map_err(|e| {
            error!("Failed to parse dataset file {}: {}", self.path.display(), e);
            DataLoadError::Malformed(format!("invalid dataset JSON: {}", e))
        })?;

        debug!(
            "Loaded {} donation records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// In-memory dataset, for tests and caller-supplied fallback data.
pub struct StaticDatasetRepository {
    records: Vec<RawDonation>,
}

impl StaticDatasetRepository {
    pub fn new(records: Vec<RawDonation>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetRepository for StaticDatasetRepository {
    async fn load(&self) -> DataLoadResult<Vec<RawDonation>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_json_repository_loads_tolerantly() {
        let payload = r#"[
            {"Email": "a@x.com", "Value": 50.0, "Entry Date": "2024-01-15"},
            {"Email": "b@x.com", "Value": "75.50", "Entry Date": "someday"},
            {}
        ]"#;
        let dir = std::env::temp_dir();
        let path = dir.join("donor_analytics_core_dataset_test.json");
        tokio::fs::write(&path, payload).await.unwrap();

        let repo = JsonDatasetRepository::new(&path);
        let records = repo.load().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].value(), dec!(50));
        assert_eq!(records[1].value(), dec!(75.50));
        assert_eq!(records[1].entry_date(), None);
        assert_eq!(records[2].email(), "");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_json_repository_surfaces_missing_file() {
        let repo = JsonDatasetRepository::new("/nonexistent/dataframe.json");
        let result = repo.load().await;
        assert!(matches!(result, Err(DataLoadError::Io(_))));
    }

    #[tokio::test]
    async fn test_json_repository_surfaces_malformed_payload() {
        let dir = std::env::temp_dir();
        let path = dir.join("donor_analytics_core_malformed_test.json");
        tokio::fs::write(&path, "{\"not\": \"an array\"}").await.unwrap();

        let repo = JsonDatasetRepository::new(&path);
        let result = repo.load().await;
        assert!(matches!(result, Err(DataLoadError::Malformed(_))));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
