//! Spend per owner broken down by resource type

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
use crate::types::{decode_rows, RawRecord, Report, Result, SpendByResourceRow};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use tracing::info;

const SQL: &str = "SELECT user_owner, product_name, start_date, SUM(cost) AS cost \
                   FROM databasename.tablename \
                   GROUP BY user_owner, product_name, start_date;";

/// Two-level variant: owner → resource type → day. Chart and table.
pub struct SpendByResource {
    sql: String,
    owner_filter: Regex,
    threshold: f64,
    window: Vec<NaiveDate>,
}

impl SpendByResource {
    pub fn new(config: &ReportConfig, clock: &dyn Clock) -> Self {
        SpendByResource {
            sql: inject_sql_config(SQL, &config.database, &config.table),
            owner_filter: config.owner_filter.clone(),
            threshold: config.threshold,
            window: lookback_window(config.days_back, clock),
        }
    }
}

impl ReportService for SpendByResource {
    fn name(&self) -> &'static str {
        "spend-by-resource"
    }

    fn reports(&self, client: &dyn QueryClient) -> Result<Vec<Report>> {
        info!(
            "generating spend-by-resource reports for the last {} days",
            self.window.len()
        );
        let rows: Vec<SpendByResourceRow> = decode_rows(client.execute(&self.sql)?);
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
            let lines = dimension_lines(owner, &self.window, scale, &mut palette);
            let title = format!(
                "Total spend for {} the past {} days {} USD",
                owner.owner(),
                self.window.len(),
                format_cost(owner.total(), 2)
            );
            reports.push(
                Report::new(owner.owner())
                    .with_chart(chart_request(title, lines, &self.window, scale))
                    .with_table(dimension_table("Resource", owner, &self.window)),
            );
            info!("report generated for: {}", owner.owner());
        }
        info!("reports generated: {}", reports.len());
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::config::ConfigValues;
    use crate::query::StaticQueryClient;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn service() -> SpendByResource {
        let config = ReportConfig::new(
            ConfigValues {
                user_owner_regexp: ".*".into(),
                report_threshold: None,
                days_back: 30,
                sql_database_name: "billing".into(),
                sql_table_name: "line_items".into(),
            },
            HashMap::new(),
        )
        .unwrap();
        let clock = FixedClock(Utc.with_ymd_and_hms(2017, 9, 30, 0, 0, 0).unwrap());
        SpendByResource::new(&config, &clock)
    }

    #[test]
    fn test_one_line_per_resource() {
        let client = StaticQueryClient::new(vec![
            json!({"user_owner": "john.doe", "product_name": "Ec2", "start_date": "2017-09-01", "cost": 100.0}),
            json!({"user_owner": "john.doe", "product_name": "S3", "start_date": "2017-09-01", "cost": 20.0}),
        ]);

        let reports = service().reports(&client).unwrap();
        assert_eq!(reports.len(), 1);

        let chart = reports[0].chart.as_ref().unwrap();
        assert_eq!(chart.lines.len(), 2);
        assert_eq!(chart.lines[0].label, "Ec2 100.00");
        assert_eq!(chart.lines[1].label, "S3 20.00");

        let table = reports[0].table.as_ref().unwrap();
        assert_eq!(table.header[0], "Resource");
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_scale_follows_peak_daily_aggregate() {
        // Two resources on the same day: aggregate 120 → hundred-USD tier
        let client = StaticQueryClient::new(vec![
            json!({"user_owner": "john.doe", "product_name": "Ec2", "start_date": "2017-09-01", "cost": 100.0}),
            json!({"user_owner": "john.doe", "product_name": "S3", "start_date": "2017-09-01", "cost": 20.0}),
        ]);

        let reports = service().reports(&client).unwrap();
        let chart = reports[0].chart.as_ref().unwrap();
        assert_eq!(chart.y_axis_title, "Cost in hundred USD");
        // 100 / 10 and 20 / 10
        assert_eq!(chart.lines[0].values[0], 10.0);
        assert_eq!(chart.lines[1].values[0], 2.0);
    }

    #[test]
    fn test_owner_order_is_first_seen() {
        let client = StaticQueryClient::new(vec![
            json!({"user_owner": "zoe", "product_name": "Ec2", "start_date": "2017-09-01", "cost": 1.0}),
            json!({"user_owner": "adam", "product_name": "Ec2", "start_date": "2017-09-01", "cost": 1.0}),
        ]);

        let reports = service().reports(&client).unwrap();
        let owners: Vec<&str> = reports.iter().map(|r| r.owner.as_str()).collect();
        assert_eq!(owners, vec!["zoe", "adam"]);
    }

    #[test]
    fn test_palette_resets_per_owner() {
        let client = StaticQueryClient::new(vec![
            json!({"user_owner": "zoe", "product_name": "Ec2", "start_date": "2017-09-01", "cost": 1.0}),
            json!({"user_owner": "zoe", "product_name": "S3", "start_date": "2017-09-01", "cost": 1.0}),
            json!({"user_owner": "adam", "product_name": "Rds", "start_date": "2017-09-01", "cost": 1.0}),
        ]);

        let reports = service().reports(&client).unwrap();
        let zoe = reports[0].chart.as_ref().unwrap();
        let adam = reports[1].chart.as_ref().unwrap();
        // Both owners' first lines get the first palette color
        assert_eq!(zoe.lines[0].color, adam.lines[0].color);
    }
}
