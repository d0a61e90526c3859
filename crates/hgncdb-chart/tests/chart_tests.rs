use std::collections::BTreeMap;
use std::sync::Arc;

use hgncdb_core::config::ChartSettings;
use hgncdb_core::traits::ChartRenderer;
use hgncdb_core::types::AggregationResult;
use hgncdb_core::Error;
use hgncdb_chart::{publish_chart, PublishedChart, SvgBarChart};
use hgncdb_store::Stores;

fn years(pairs: &[(&str, u64)]) -> AggregationResult {
    let counts: BTreeMap<String, u64> = pairs.iter().map(|(l, c)| (l.to_string(), *c)).collect();
    AggregationResult::from_counts(("Years", "Number of Entries Approved"), counts)
}

fn small_chart(scratch: &tempfile::TempDir) -> SvgBarChart {
    SvgBarChart::new(&ChartSettings {
        width: 800,
        height: 300,
        scratch_dir: Some(scratch.path().to_string_lossy().to_string()),
        ..Default::default()
    })
}

#[test]
fn renders_svg_and_cleans_scratch_file() -> anyhow::Result<()> {
    let scratch = tempfile::tempdir()?;
    let chart = small_chart(&scratch);
    let bytes = chart.render_bar_chart(&years(&[("1989", 2), ("1990", 7), ("1991", 3)]))?;

    let text = String::from_utf8(bytes)?;
    assert!(text.contains("<svg"), "not an svg document");
    assert!(text.contains("1990"), "bar labels missing");
    assert_eq!(chart.content_type(), "image/svg+xml");
    assert_eq!(std::fs::read_dir(scratch.path())?.count(), 0, "scratch file left behind");
    Ok(())
}

#[test]
fn empty_aggregation_is_not_rendered() -> anyhow::Result<()> {
    let scratch = tempfile::tempdir()?;
    let err = small_chart(&scratch).render_bar_chart(&years(&[])).unwrap_err();
    assert!(matches!(err, Error::Render(_)));
    Ok(())
}

struct FixedRenderer(&'static [u8]);

impl ChartRenderer for FixedRenderer {
    fn render_bar_chart(&self, _data: &AggregationResult) -> hgncdb_core::Result<Vec<u8>> {
        Ok(self.0.to_vec())
    }
    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }
    fn file_extension(&self) -> &'static str {
        "bin"
    }
}

#[tokio::test]
async fn publish_replaces_previous_chart() -> anyhow::Result<()> {
    let stores = Stores::in_memory();

    let first = publish_chart(Arc::new(FixedRenderer(b"one")), &stores.artifacts, years(&[("1989", 2)])).await?;
    assert_eq!(first, PublishedChart { bars: 1, bytes: 3 });

    let data = years(&[("2000", 1), ("2001", 4)]);
    publish_chart(Arc::new(FixedRenderer(b"two!")), &stores.artifacts, data.clone()).await?;

    assert_eq!(stores.artifacts.image().await?, b"two!".to_vec());
    assert_eq!(stores.artifacts.snapshot().await?, data);
    assert_eq!(stores.artifacts.count().await?, 2);
    Ok(())
}

#[tokio::test]
async fn publish_with_svg_renderer_stores_image() -> anyhow::Result<()> {
    let scratch = tempfile::tempdir()?;
    let stores = Stores::in_memory();
    let renderer: Arc<dyn ChartRenderer> = Arc::new(small_chart(&scratch));

    let published = publish_chart(renderer, &stores.artifacts, years(&[("1995", 10)])).await?;
    assert_eq!(published.bars, 1);
    assert_eq!(stores.artifacts.image().await?.len(), published.bytes);
    Ok(())
}
