//! Namespaced key-value storage for gene records and chart artifacts.
//!
//! Every namespace is an independent [`KvBackend`] handle. [`Stores`] builds
//! the three handles once at startup; components receive clones of it.

pub mod artifacts;
pub mod backend;
pub mod records;

use std::sync::Arc;

use hgncdb_core::config::{StoreBackend, StoreSettings, STORE_HOST_VAR};
use hgncdb_core::traits::KvBackend;
use hgncdb_core::types::Namespace;
use hgncdb_core::{Error, Result};

pub use artifacts::{ArtifactStore, ARTIFACT_DATA_KEY, ARTIFACT_IMAGE_KEY};
pub use backend::memory::MemoryBackend;
pub use backend::redis::RedisBackend;
pub use records::RecordStore;

#[derive(Clone)]
pub struct Stores {
    pub records: RecordStore,
    pub artifacts: ArtifactStore,
    /// Namespace 2. Held open but never written.
    pub reserved: Arc<dyn KvBackend>,
}

impl Stores {
    pub async fn connect(settings: &StoreSettings) -> Result<Self> {
        match settings.backend {
            StoreBackend::Memory => {
                tracing::info!("using in-memory store");
                Ok(Self::in_memory())
            }
            StoreBackend::Redis => {
                let host = settings.host.as_deref().filter(|h| !h.trim().is_empty()).ok_or_else(|| {
                    Error::Connection(format!("{} is not set; the store location is required", STORE_HOST_VAR))
                })?;
                let records = RedisBackend::connect(host, settings.port, Namespace::Records).await?;
                let artifacts = RedisBackend::connect(host, settings.port, Namespace::Artifacts).await?;
                let reserved = RedisBackend::connect(host, settings.port, Namespace::Reserved).await?;
                tracing::info!(host, port = settings.port, "connected to redis");
                Ok(Self::from_backends(Arc::new(records), Arc::new(artifacts), Arc::new(reserved)))
            }
        }
    }

    pub fn in_memory() -> Self {
        Self::from_backends(
            Arc::new(MemoryBackend::new()),
            Arc::new(MemoryBackend::new()),
            Arc::new(MemoryBackend::new()),
        )
    }

    pub fn from_backends(
        records: Arc<dyn KvBackend>,
        artifacts: Arc<dyn KvBackend>,
        reserved: Arc<dyn KvBackend>,
    ) -> Self {
        Self {
            records: RecordStore::new(records),
            artifacts: ArtifactStore::new(artifacts),
            reserved,
        }
    }
}
