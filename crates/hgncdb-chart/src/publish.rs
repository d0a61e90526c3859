use std::sync::Arc;

use hgncdb_core::traits::ChartRenderer;
use hgncdb_core::types::AggregationResult;
use hgncdb_core::{Error, Result};
use hgncdb_store::ArtifactStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishedChart {
    pub bars: usize,
    pub bytes: usize,
}

/// Render `data` off the async runtime and store the image together with
/// the aggregation it came from, replacing any previous chart.
pub async fn publish_chart(
    renderer: Arc<dyn ChartRenderer>,
    artifacts: &ArtifactStore,
    data: AggregationResult,
) -> Result<PublishedChart> {
    let (image, data) = tokio::task::spawn_blocking(move || {
        renderer.render_bar_chart(&data).map(|image| (image, data))
    })
    .await
    .map_err(|e| Error::Render(format!("render task failed: {}", e)))??;

    artifacts.put_chart(&image, &data).await?;
    let published = PublishedChart { bars: data.len(), bytes: image.len() };
    tracing::info!(bars = published.bars, bytes = published.bytes, "chart published");
    Ok(published)
}
