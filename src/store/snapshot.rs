use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scheduler::{Execution, Job};

/// Point-in-time export of a store's jobs and executions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub jobs: Vec<Job>,
    /// Executions in arrival order
    #[serde(default)]
    pub executions: Vec<Execution>,
}

impl StoreSnapshot {
    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Read a snapshot from a JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path).await?;
        let snapshot = Self::from_json(&data)?;
        tracing::info!(
            path = %path.display(),
            jobs = snapshot.jobs.len(),
            executions = snapshot.executions.len(),
            "Loaded store snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    #[test]
    fn empty_document_is_an_empty_snapshot() {
        let snapshot = StoreSnapshot::from_json(b"{}").unwrap();
        assert_eq!(snapshot, StoreSnapshot::default());
    }

    #[test]
    fn malformed_document_is_a_serialization_error() {
        let err = StoreSnapshot::from_json(b"{\"jobs\": 3}").unwrap_err();
        assert!(matches!(err, DashboardError::Serialization(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = StoreSnapshot::load(Path::new("/definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }
}
