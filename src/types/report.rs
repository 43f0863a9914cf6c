//! Assembled report payloads handed to the rendering back-ends

use serde::Serialize;

/// One plotted line: chronological per-day values already divided by the
/// selected scale, plus the legend label and palette color.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartLine {
    pub label: String,
    /// RRGGBB hex, no leading '#'
    pub color: String,
    pub values: Vec<f64>,
}

/// Everything a chart renderer needs to draw one owner's spend chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartRequest {
    pub title: String,
    pub lines: Vec<ChartLine>,
    pub x_axis_labels: Vec<String>,
    pub y_axis_labels: Vec<u32>,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub width: u32,
    pub height: u32,
}

/// Everything a table renderer needs to emit one owner's spend table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableRequest {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: String,
}

/// One owner's report for a single variant. Immutable once built; a new
/// tree is ingested and discarded on every run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    pub owner: String,
    pub chart: Option<ChartRequest>,
    pub table: Option<TableRequest>,
}

impl Report {
    pub fn new(owner: impl Into<String>) -> Self {
        Report {
            owner: owner.into(),
            chart: None,
            table: None,
        }
    }

    pub fn with_chart(mut self, chart: ChartRequest) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn with_table(mut self, table: TableRequest) -> Self {
        self.table = Some(table);
        self
    }
}

/// All reports for one owner across the variants of a run, in the order
/// the variants produced them. Owners appear in first-seen order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OwnerGroup {
    pub owner: String,
    pub reports: Vec<Report>,
}

impl OwnerGroup {
    pub fn new(owner: impl Into<String>) -> Self {
        OwnerGroup {
            owner: owner.into(),
            reports: Vec::new(),
        }
    }
}
