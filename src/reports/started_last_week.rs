//! Resources that first appeared during the past week
//!
//! Lists newly started resource identifiers per owner. There is no cost
//! rollup here and no threshold: a new resource is worth a mention no
//! matter how little it has cost so far.

use super::ReportService;
use crate::calendar::{lookback_window, parse_day, Clock};
use crate::config::ReportConfig;
use crate::format::format_cost;
use crate::query::QueryClient;
use crate::sql::inject_sql_config;
use crate::types::{decode_rows, Report, ResourceLaunchRow, Result, TableRequest};
use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashMap;
use tracing::{info, warn};

const SQL: &str = "SELECT user_owner, account_id, product_name, resource_id, start_date, cost \
                   FROM databasename.tablename \
                   WHERE start_date >= date_add('day', -7, current_date);";

const DAYS_BACK: u32 = 7;

/// Listing variant: per-owner table of last week's new resources.
pub struct ResourceStartedLastWeek {
    sql: String,
    owner_filter: Regex,
    account_names: HashMap<String, String>,
    window: Vec<NaiveDate>,
}

impl ResourceStartedLastWeek {
    pub fn new(config: &ReportConfig, clock: &dyn Clock) -> Self {
        ResourceStartedLastWeek {
            sql: inject_sql_config(SQL, &config.database, &config.table),
            owner_filter: config.owner_filter.clone(),
            account_names: config.account_names.clone(),
            window: lookback_window(DAYS_BACK, clock),
        }
    }

    fn table(&self, launches: &[ResourceLaunchRow]) -> TableRequest {
        let header = vec![
            "Account".to_string(),
            "Resource".to_string(),
            "Resource ID".to_string(),
            "Started".to_string(),
            "Cost".to_string(),
        ];

        let mut rows = Vec::with_capacity(launches.len());
        for launch in launches {
            let started = match parse_day(&launch.start_date) {
                Ok(day) => day.format("%b %d, %Y").to_string(),
                Err(e) => {
                    warn!("skipping launch row for {}: {e}", launch.user_owner);
                    continue;
                }
            };
            let account = self
                .account_names
                .get(&launch.account_id)
                .cloned()
                .unwrap_or_else(|| launch.account_id.clone());
            rows.push(vec![
                account,
                launch.product_name.clone(),
                launch.resource_id.clone(),
                started,
                format_cost(launch.cost, 2),
            ]);
        }

        TableRequest {
            header,
            rows,
            footer: format!("Resources started during the past {} days", self.window.len()),
        }
    }
}

impl ReportService for ResourceStartedLastWeek {
    fn name(&self) -> &'static str {
        "resource-started-last-week"
    }

    fn reports(&self, client: &dyn QueryClient) -> Result<Vec<Report>> {
        info!(
            "generating started-last-week reports for the last {} days",
            self.window.len()
        );
        let rows: Vec<ResourceLaunchRow> = decode_rows(client.execute(&self.sql)?);

        let mut by_owner: IndexMap<String, Vec<ResourceLaunchRow>> = IndexMap::new();
        for row in rows {
            if !self.owner_filter.is_match(&row.user_owner) {
                continue;
            }
            by_owner.entry(row.user_owner.clone()).or_default().push(row);
        }

        let reports: Vec<Report> = by_owner
            .iter()
            .map(|(owner, launches)| Report::new(owner).with_table(self.table(launches)))
            .collect();
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

    fn service(accounts: HashMap<String, String>) -> ResourceStartedLastWeek {
        let config = ReportConfig::new(
            ConfigValues {
                user_owner_regexp: r"john\.doe".into(),
                // A threshold is configured but this variant ignores it
                report_threshold: Some(1_000_000.0),
                days_back: 30,
                sql_database_name: "billing".into(),
                sql_table_name: "line_items".into(),
            },
            accounts,
        )
        .unwrap();
        let clock = FixedClock(Utc.with_ymd_and_hms(2017, 9, 25, 0, 0, 0).unwrap());
        ResourceStartedLastWeek::new(&config, &clock)
    }

    #[test]
    fn test_lists_launches_without_threshold_filtering() {
        let client = StaticQueryClient::new(vec![
            json!({"user_owner": "john.doe", "account_id": "QA", "product_name": "Ec2", "resource_id": "i-01def0a998e06c30e", "start_date": "2017-09-19", "cost": 1000.0}),
            json!({"user_owner": "john.doe", "account_id": "Nova", "product_name": "Ec2", "resource_id": "v-01def02344e06c30e", "start_date": "2017-09-20", "cost": 1000.0}),
        ]);

        let reports = service(HashMap::new()).reports(&client).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].owner, "john.doe");
        assert!(reports[0].chart.is_none());

        let table = reports[0].table.as_ref().unwrap();
        assert_eq!(
            table.header,
            vec!["Account", "Resource", "Resource ID", "Started", "Cost"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0],
            vec!["QA", "Ec2", "i-01def0a998e06c30e", "Sep 19, 2017", "1 000.00"]
        );
        assert_eq!(table.footer, "Resources started during the past 7 days");
    }

    #[test]
    fn test_account_name_lookup_applies() {
        let mut accounts = HashMap::new();
        accounts.insert("QA".to_string(), "Quality Assurance".to_string());

        let client = StaticQueryClient::new(vec![
            json!({"user_owner": "john.doe", "account_id": "QA", "product_name": "Ec2", "resource_id": "i-1", "start_date": "2017-09-19", "cost": 1.0}),
        ]);

        let reports = service(accounts).reports(&client).unwrap();
        let table = reports[0].table.as_ref().unwrap();
        assert_eq!(table.rows[0][0], "Quality Assurance");
    }

    #[test]
    fn test_owner_filter_still_applies() {
        let client = StaticQueryClient::new(vec![
            json!({"user_owner": "jane.doe", "account_id": "QA", "product_name": "Ec2", "resource_id": "i-1", "start_date": "2017-09-19", "cost": 1.0}),
        ]);
        assert!(service(HashMap::new()).reports(&client).unwrap().is_empty());
    }

    #[test]
    fn test_bad_start_date_skips_the_row() {
        let client = StaticQueryClient::new(vec![
            json!({"user_owner": "john.doe", "account_id": "QA", "product_name": "Ec2", "resource_id": "i-1", "start_date": "bogus", "cost": 1.0}),
            json!({"user_owner": "john.doe", "account_id": "QA", "product_name": "Ec2", "resource_id": "i-2", "start_date": "2017-09-19", "cost": 1.0}),
        ]);

        let reports = service(HashMap::new()).reports(&client).unwrap();
        let table = reports[0].table.as_ref().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][2], "i-2");
    }
}
