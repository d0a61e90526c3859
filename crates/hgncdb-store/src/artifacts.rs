use std::sync::Arc;

use hgncdb_core::traits::KvBackend;
use hgncdb_core::types::AggregationResult;
use hgncdb_core::{Error, Result};

pub const ARTIFACT_IMAGE_KEY: &str = "artifact_image";
pub const ARTIFACT_DATA_KEY: &str = "artifact_data";

/// Artifact namespace: the current chart image and the aggregation it was
/// drawn from. Each write overwrites; nothing is versioned.
#[derive(Clone)]
pub struct ArtifactStore {
    backend: Arc<dyn KvBackend>,
}

impl ArtifactStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    pub async fn put_chart(&self, image: &[u8], data: &AggregationResult) -> Result<()> {
        let snapshot = serde_json::to_vec(data)?;
        self.backend.set(ARTIFACT_IMAGE_KEY, image).await?;
        self.backend.set(ARTIFACT_DATA_KEY, &snapshot).await
    }

    pub async fn image(&self) -> Result<Vec<u8>> {
        self.backend
            .get(ARTIFACT_IMAGE_KEY)
            .await?
            .ok_or_else(|| Error::NotFound("no image has been generated".to_string()))
    }

    pub async fn snapshot(&self) -> Result<AggregationResult> {
        let bytes = self
            .backend
            .get(ARTIFACT_DATA_KEY)
            .await?
            .ok_or_else(|| Error::NotFound("no image data has been generated".to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn count(&self) -> Result<usize> {
        self.backend.count().await
    }

    /// Drop the image and its snapshot. Returns how many keys were present.
    pub async fn clear(&self) -> Result<usize> {
        let removed = self.backend.count().await?;
        if removed > 0 {
            self.backend.clear().await?;
        }
        Ok(removed)
    }
}
