//! Bar chart rendering and artifact publication.

pub mod publish;
pub mod svg;

pub use publish::{publish_chart, PublishedChart};
pub use svg::SvgBarChart;
