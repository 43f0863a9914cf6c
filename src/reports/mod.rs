//! Report variant services
//!
//! Each variant runs one analytic query, rolls the rows up into its own
//! tree and emits one [`Report`] per qualifying owner. Variants share
//! nothing at run time; an orchestrator may execute them in parallel.

pub mod generator;
mod spend_by_account;
mod spend_by_resource;
mod started_last_week;
mod total_spend;

pub use generator::{ReportGenerator, RunOutcome, VariantFailure};
pub use spend_by_account::SpendByAccount;
pub use spend_by_resource::SpendByResource;
pub use started_last_week::ResourceStartedLastWeek;
pub use total_spend::TotalSpendPerOwner;

use crate::calendar::day_of_month_labels;
use crate::format::format_cost;
use crate::palette::Palette;
use crate::query::QueryClient;
use crate::rollup::OwnerNode;
use crate::scale::Scale;
use crate::types::{ChartLine, ChartRequest, Report, Result, TableRequest};
use chrono::NaiveDate;
use tracing::info;

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 300;

/// A report variant: one query, one rollup, one report per owner.
pub trait ReportService: Send + Sync {
    /// Variant name used in logs and failure reporting
    fn name(&self) -> &'static str;

    /// Run the variant's query and assemble its reports
    fn reports(&self, client: &dyn QueryClient) -> Result<Vec<Report>>;
}

/// The owner's aggregate cost for every window day, chronological.
fn window_daily_totals(owner: &OwnerNode, window: &[NaiveDate]) -> Vec<f64> {
    window.iter().map(|d| owner.daily_total(*d)).collect()
}

/// Threshold gate. Owners strictly below the threshold are excluded
/// (equality keeps the owner in); exclusion is logged, never an error.
fn below_threshold(variant: &str, owner: &OwnerNode, threshold: f64) -> bool {
    let total = owner.total();
    if total < threshold {
        info!(
            "{variant}: excluding {}, total {} below threshold {}",
            owner.owner(),
            format_cost(total, 2),
            format_cost(threshold, 2)
        );
        true
    } else {
        false
    }
}

/// One chart line per dimension: per-day cost divided by the scale,
/// labeled with the display name and the formatted dimension total.
/// The palette restarts for every owner.
fn dimension_lines(
    owner: &OwnerNode,
    window: &[NaiveDate],
    scale: Scale,
    palette: &mut Palette,
) -> Vec<ChartLine> {
    palette.reset();
    owner
        .dimensions()
        .map(|dim| ChartLine {
            label: format!("{} {}", dim.display_name(), format_cost(dim.total(), 2)),
            color: palette.next_color().to_string(),
            values: window
                .iter()
                .map(|d| dim.day_cost(*d) / scale.divisor())
                .collect(),
        })
        .collect()
}

fn chart_request(
    title: String,
    lines: Vec<ChartLine>,
    window: &[NaiveDate],
    scale: Scale,
) -> ChartRequest {
    ChartRequest {
        title,
        lines,
        x_axis_labels: day_of_month_labels(window),
        y_axis_labels: scale.y_axis_labels().to_vec(),
        x_axis_title: "Day".to_string(),
        y_axis_title: format!("Cost in {}", scale.suffix()),
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
    }
}

/// Spend table for a two-level owner: one row per dimension with the
/// formatted cost for every window day and the dimension total.
fn dimension_table(dimension_label: &str, owner: &OwnerNode, window: &[NaiveDate]) -> TableRequest {
    let mut header = Vec::with_capacity(window.len() + 2);
    header.push(dimension_label.to_string());
    for day in window {
        header.push(day.format("%b %d, %Y").to_string());
    }
    header.push("Total".to_string());

    let rows = owner
        .dimensions()
        .map(|dim| {
            let mut row = Vec::with_capacity(window.len() + 2);
            row.push(format!("{} ($)", dim.display_name()));
            for day in window {
                row.push(format_cost(dim.day_cost(*day), 2));
            }
            row.push(format_cost(dim.total(), 2));
            row
        })
        .collect();

    TableRequest {
        header,
        rows,
        footer: format!("Total: ${}", format_cost(owner.total(), 2)),
    }
}
