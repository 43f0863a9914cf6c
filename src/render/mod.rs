//! Rendering back-end boundary
//!
//! The engine only builds [`ChartRequest`] / [`TableRequest`] payloads;
//! turning them into a URL or markup happens behind these traits. The
//! provided adapters cover the e-mail delivery path: an image-chart URL
//! and a static HTML table.

mod gchart;
mod html;

pub use gchart::GoogleChartRenderer;
pub use html::HtmlTableRenderer;

use crate::types::{ChartRequest, TableRequest};

/// Turns a chart payload into an opaque URL string.
pub trait ChartRenderer {
    fn render(&self, chart: &ChartRequest) -> String;
}

/// Turns a table payload into an HTML string.
pub trait TableRenderer {
    fn render(&self, table: &TableRequest) -> String;
}
