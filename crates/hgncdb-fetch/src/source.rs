use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use hgncdb_core::config::UpstreamSettings;
use hgncdb_core::traits::DatasetSource;
use hgncdb_core::types::GeneRecord;
use hgncdb_core::{Error, Result};

/// `{"response": {"docs": [...]}}`, the shape of the HGNC complete-set dump.
#[derive(Deserialize)]
struct Envelope {
    response: ResponseBody,
}

#[derive(Deserialize)]
struct ResponseBody {
    docs: Vec<GeneRecord>,
}

/// Downloads the complete set in one GET.
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch(format!("failed to build http client: {}", e)))?;
        Ok(Self { client, url: settings.url.clone(), timeout })
    }

    fn fetch_err(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Fetch(format!("{} timed out after {}s", self.url, self.timeout.as_secs()))
        } else if e.is_decode() {
            Error::Fetch(format!("malformed dataset from {}: {}", self.url, e))
        } else {
            Error::Fetch(format!("{}: {}", self.url, e))
        }
    }
}

#[async_trait]
impl DatasetSource for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<GeneRecord>> {
        tracing::info!(url = %self.url, "fetching dataset");
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.fetch_err(e))?;
        let envelope: Envelope = resp.json().await.map_err(|e| self.fetch_err(e))?;
        tracing::info!(records = envelope.response.docs.len(), "dataset decoded");
        Ok(envelope.response.docs)
    }
}

/// Fixed in-memory record list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<GeneRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<GeneRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<GeneRecord>> {
        Ok(self.records.clone())
    }
}
