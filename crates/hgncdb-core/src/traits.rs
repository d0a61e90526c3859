use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AggregationResult, GeneRecord};

/// Raw key-value service for a single namespace.
#[async_trait]
pub trait KvBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    /// Values for `keys`, positionally. Missing keys are `None`.
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>>;
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    async fn keys(&self) -> Result<Vec<String>>;
    async fn clear(&self) -> Result<()>;
    async fn count(&self) -> Result<usize>;
}

/// Where ingestion gets its records from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<GeneRecord>>;
}

/// Turns ordered `(label, count)` pairs into image bytes. Blocking.
pub trait ChartRenderer: Send + Sync {
    fn render_bar_chart(&self, data: &AggregationResult) -> Result<Vec<u8>>;
    fn content_type(&self) -> &'static str;
    fn file_extension(&self) -> &'static str;
}
