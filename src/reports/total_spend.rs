//! Total spend per owner, no sub-dimension

use super::{below_threshold, chart_request, window_daily_totals, ReportService};
use crate::calendar::{lookback_window, Clock};
use crate::config::ReportConfig;
use crate::format::format_cost;
use crate::palette::Palette;
use crate::query::QueryClient;
use crate::rollup::ingest;
use crate::scale::select_scale;
use crate::sql::inject_sql_config;
use crate::types::{decode_rows, ChartLine, RawRecord, Report, Result, TotalSpendRow};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use tracing::info;

const SQL: &str = "SELECT user_owner, start_date, SUM(cost) AS cost \
                   FROM databasename.tablename \
                   GROUP BY user_owner, start_date;";

/// Single-level variant: one unlabeled line of the owner's daily total.
pub struct TotalSpendPerOwner {
    sql: String,
    owner_filter: Regex,
    threshold: f64,
    window: Vec<NaiveDate>,
}

impl TotalSpendPerOwner {
    pub fn new(config: &ReportConfig, clock: &dyn Clock) -> Self {
        TotalSpendPerOwner {
            sql: inject_sql_config(SQL, &config.database, &config.table),
            owner_filter: config.owner_filter.clone(),
            threshold: config.threshold,
            window: lookback_window(config.days_back, clock),
        }
    }
}

impl ReportService for TotalSpendPerOwner {
    fn name(&self) -> &'static str {
        "total-spend"
    }

    fn reports(&self, client: &dyn QueryClient) -> Result<Vec<Report>> {
        info!(
            "generating total spend reports for the last {} days",
            self.window.len()
        );
        let rows: Vec<TotalSpendRow> = decode_rows(client.execute(&self.sql)?);
        let outcome = ingest(
            rows.into_iter().map(RawRecord::from),
            &self.owner_filter,
            &HashMap::new(),
        );

        let mut palette = Palette::new();
        let mut reports = Vec::new();
        for owner in outcome.tree.owners() {
            if below_threshold(self.name(), owner, self.threshold) {
                continue;
            }

            let daily = window_daily_totals(owner, &self.window);
            let scale = select_scale(&daily);
            palette.reset();
            let line = ChartLine {
                label: String::new(),
                color: palette.next_color().to_string(),
                values: daily.iter().map(|c| c / scale.divisor()).collect(),
            };
            let title = format!(
                "Total spend for {} the past {} days {} USD",
                owner.owner(),
                self.window.len(),
                format_cost(owner.total(), 2)
            );
            reports.push(
                Report::new(owner.owner())
                    .with_chart(chart_request(title, vec![line], &self.window, scale)),
            );
            info!("report generated for: {}", owner.owner());
        }
        info!("reports generated: {}", reports.len());
        Ok(reports)
    }
}
