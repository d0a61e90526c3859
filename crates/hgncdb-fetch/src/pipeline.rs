use std::time::Instant;

use serde::Serialize;

use hgncdb_core::traits::DatasetSource;
use hgncdb_core::types::GeneRecord;
use hgncdb_core::Result;
use hgncdb_store::RecordStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub written: usize,
    /// Records without an `hgnc_id`.
    pub skipped: usize,
}

/// Write each record whole under its trimmed id.
///
/// Records lacking an id are skipped and logged. A store failure stops the
/// loop and is returned; keys written before it stay in place.
pub async fn ingest(store: &RecordStore, records: &[GeneRecord]) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    for (index, record) in records.iter().enumerate() {
        let Some(id) = record.id() else {
            tracing::warn!(index, symbol = ?record.symbol, "skipping record without hgnc_id");
            report.skipped += 1;
            continue;
        };
        if record.hgnc_id.as_deref() == Some(id) {
            store.put(id, record).await?;
        } else {
            // Stored value carries the same trimmed id it is keyed by.
            let normalized = GeneRecord { hgnc_id: Some(id.to_string()), ..record.clone() };
            store.put(id, &normalized).await?;
        }
        report.written += 1;
    }
    Ok(report)
}

/// Fetch from `source` and ingest everything it returns.
pub async fn refresh(source: &dyn DatasetSource, store: &RecordStore) -> Result<IngestReport> {
    let started = Instant::now();
    let records = source.fetch().await?;
    let report = ingest(store, &records).await?;
    tracing::info!(
        written = report.written,
        skipped = report.skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "ingest complete"
    );
    Ok(report)
}
