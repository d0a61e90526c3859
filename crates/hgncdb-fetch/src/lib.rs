//! Upstream dataset retrieval and ingestion into the record store.

pub mod pipeline;
pub mod source;

pub use pipeline::{ingest, refresh, IngestReport};
pub use source::{HttpFetcher, StaticSource};
