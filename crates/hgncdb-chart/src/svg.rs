use std::path::{Path, PathBuf};

use plotters::prelude::*;

use hgncdb_core::config::ChartSettings;
use hgncdb_core::traits::ChartRenderer;
use hgncdb_core::types::AggregationResult;
use hgncdb_core::{Error, Result};

/// Renders an aggregation as an SVG bar chart, one bar per label.
///
/// plotters writes to a file, so each render goes through a temporary file
/// that is read back and removed.
pub struct SvgBarChart {
    width: u32,
    height: u32,
    title: String,
    scratch_dir: Option<PathBuf>,
}

impl SvgBarChart {
    pub fn new(settings: &ChartSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            title: settings.title.clone(),
            scratch_dir: settings.scratch_path(),
        }
    }

    fn scratch_file(&self) -> Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("approvalyears").suffix(".svg");
        let file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        file.map_err(|e| Error::Render(format!("cannot create scratch file: {}", e)))
    }

    fn draw(&self, path: &Path, data: &AggregationResult) -> Result<()> {
        let entries = data.entries();
        let (x_desc, y_desc) = data.header();
        let bars = entries.len() as u32;
        let peak = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let y_top = peak + peak / 10 + 1;

        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d((0u32..bars).into_segmented(), 0u64..y_top)
            .map_err(render_err)?;

        let label_of = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => entries.get(*i as usize).map(|(l, _)| l.clone()).unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_labels(entries.len())
            .x_label_formatter(&label_of)
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(entries.iter().enumerate().map(|(i, (_, count))| {
                let i = i as u32;
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), *count)],
                    BLUE.mix(0.8).filled(),
                );
                bar.set_margin(0, 0, 6, 6);
                bar
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

impl ChartRenderer for SvgBarChart {
    fn render_bar_chart(&self, data: &AggregationResult) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(Error::Render("nothing to plot".to_string()));
        }
        let scratch = self.scratch_file()?;
        self.draw(scratch.path(), data)?;
        let bytes = std::fs::read(scratch.path())
            .map_err(|e| Error::Render(format!("cannot read rendered chart: {}", e)))?;
        tracing::debug!(bars = data.len(), bytes = bytes.len(), "chart rendered");
        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn file_extension(&self) -> &'static str {
        "svg"
    }
}
