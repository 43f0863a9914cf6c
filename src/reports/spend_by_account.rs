//! Spend per owner broken down by billing account
//!
//! Account ids resolve to friendly names through the configured lookup;
//! ids without an entry stay as-is. Rows carry a resource level below
//! the account, which collapses into the account's day buckets.

use super::{
    below_threshold, chart_request, dimension_lines, dimension_table, window_daily_totals,
    ReportService,
};
use crate::calendar::{lookback_window, Clock};
use crate::config::ReportConfig;
use crate::format::format_cost;
use crate::palette::Palette;
use crate::query::QueryClient;
use crate::rollup::ingest;
use crate::scale::select_scale;
use crate::sql::inject_sql_config;
use crate::types::{decode_rows, RawRecord, Report, Result, SpendByAccountRow};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use tracing::info;

const SQL: &str = "SELECT user_owner, account_id, product_name, start_date, SUM(cost) AS cost \
                   FROM databasename.tablename \
                   GROUP BY user_owner, account_id, product_name, start_date;";

/// Two-level variant: owner → account → day. Chart and table.
pub struct SpendByAccount {
    sql: String,
    owner_filter: Regex,
    threshold: f64,
    account_names: HashMap<String, String>,
    window: Vec<NaiveDate>,
}

impl SpendByAccount {
    pub fn new(config: &ReportConfig, clock: &dyn Clock) -> Self {
        SpendByAccount {
            sql: inject_sql_config(SQL, &config.database, &config.table),
            owner_filter: config.owner_filter.clone(),
            threshold: config.threshold,
            account_names: config.account_names.clone(),
            window: lookback_window(config.days_back, clock),
        }
    }
}

impl ReportService for SpendByAccount {
    fn name(&self) -> &'static str {
        "spend-by-account"
    }

    fn reports(&self, client: &dyn QueryClient) -> Result<Vec<Report>> {
        info!(
            "generating spend-by-account reports for the last {} days",
            self.window.len()
        );
        let rows: Vec<SpendByAccountRow> = decode_rows(client.execute(&self.sql)?);
        let outcome = ingest(
            rows.into_iter().map(RawRecord::from),
            &self.owner_filter,
            &self.account_names,
        );

        let mut palette = Palette::new();
        let mut reports = Vec::new();
        for owner in outcome.tree.owners() {
            if below_threshold(self.name(), owner, self.threshold) {
                continue;
            }

            let daily = window_daily_totals(owner, &self.window);
            let scale = select_scale(&daily);
            let lines = dimension_lines(owner, &self.window, scale, &mut palette);
            let title = format!(
                "Total spend for {} by account the past {} days. {} USD",
                owner.owner(),
                self.window.len(),
                format_cost(owner.total(), 2)
            );
            reports.push(
                Report::new(owner.owner())
                    .with_chart(chart_request(title, lines, &self.window, scale))
                    .with_table(dimension_table("Account", owner, &self.window)),
            );
            info!("report generated for: {}", owner.owner());
        }
        info!("reports generated: {}", reports.len());
        Ok(reports)
    }
}
