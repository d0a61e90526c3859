use std::sync::Arc;

use hgncdb_core::traits::KvBackend;
use hgncdb_core::types::GeneRecord;
use hgncdb_core::Result;

/// Primary namespace: one JSON-encoded [`GeneRecord`] per HGNC id.
///
/// No transactions. Concurrent writers to the same key race with last write
/// wins, and a reader iterating during an ingest may see a mix of old and new
/// records.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KvBackend>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    pub async fn get(&self, id: &str) -> Result<Option<GeneRecord>> {
        match self.backend.get(id).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Write `record` under `id`, replacing whatever was there.
    pub async fn put(&self, id: &str, record: &GeneRecord) -> Result<()> {
        let bytes = serde_json::to_vec(record)?;
        self.backend.set(id, &bytes).await
    }

    pub async fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.backend.get(id).await?.is_some())
    }

    /// All ids, ascending.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = self.backend.keys().await?;
        keys.sort();
        Ok(keys)
    }

    /// Every stored record, ordered by id, read with batched fetches. Keys
    /// that disappear between the listing and the read are skipped.
    pub async fn all(&self) -> Result<Vec<GeneRecord>> {
        let keys = self.keys().await?;
        let values = self.backend.get_many(&keys).await?;
        let mut records = Vec::with_capacity(keys.len());
        for (key, value) in keys.iter().zip(values) {
            match value {
                Some(bytes) => records.push(serde_json::from_slice(&bytes)?),
                None => tracing::debug!(key = %key, "record vanished during scan"),
            }
        }
        Ok(records)
    }

    pub async fn count(&self) -> Result<usize> {
        self.backend.count().await
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.count().await? == 0)
    }

    /// Drop every record. Returns how many were present.
    pub async fn clear(&self) -> Result<usize> {
        let removed = self.backend.count().await?;
        if removed > 0 {
            self.backend.clear().await?;
        }
        Ok(removed)
    }
}
