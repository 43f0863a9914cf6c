//! Query row shapes for the report variants
//!
//! Field names match the columns the analytic queries return
//! (`user_owner`, `account_id`, `product_name`, `start_date`, `cost`).
//! Every variant converts its rows into the generic [`RawRecord`]
//! consumed by the rollup ingester.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

/// One (owner, day) spend observation, no sub-dimension.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TotalSpendRow {
    pub user_owner: String,
    pub start_date: String,
    pub cost: f64,
}

/// One (owner, resource, day) spend observation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SpendByResourceRow {
    pub user_owner: String,
    pub product_name: String,
    pub start_date: String,
    pub cost: f64,
}

/// One (owner, account, resource, day) spend observation. The resource
/// level collapses into the account's day buckets during ingestion.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SpendByAccountRow {
    pub user_owner: String,
    pub account_id: String,
    pub product_name: String,
    pub start_date: String,
    pub cost: f64,
}

/// A resource that first appeared during the lookback window.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ResourceLaunchRow {
    pub user_owner: String,
    pub account_id: String,
    pub product_name: String,
    pub resource_id: String,
    pub start_date: String,
    pub cost: f64,
}

/// The generic row shape the ingester consumes. `dimension` present
/// means a two-level tree (owner → dimension → day), absent means the
/// day buckets hang directly off the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub owner: String,
    pub dimension: Option<String>,
    pub date: String,
    pub cost: f64,
}

impl From<TotalSpendRow> for RawRecord {
    fn from(row: TotalSpendRow) -> Self {
        RawRecord {
            owner: row.user_owner,
            dimension: None,
            date: row.start_date,
            cost: row.cost,
        }
    }
}

impl From<SpendByResourceRow> for RawRecord {
    fn from(row: SpendByResourceRow) -> Self {
        RawRecord {
            owner: row.user_owner,
            dimension: Some(row.product_name),
            date: row.start_date,
            cost: row.cost,
        }
    }
}

impl From<SpendByAccountRow> for RawRecord {
    fn from(row: SpendByAccountRow) -> Self {
        RawRecord {
            owner: row.user_owner,
            dimension: Some(row.account_id),
            date: row.start_date,
            cost: row.cost,
        }
    }
}

/// Decode a batch of query result values into typed rows.
///
/// Rows that do not match the expected shape are skipped with a warning;
/// a bad row never aborts the batch.
pub fn decode_rows<T: DeserializeOwned>(values: Vec<serde_json::Value>) -> Vec<T> {
    let mut rows = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<T>(value) {
            Ok(row) => rows.push(row),
            Err(e) => warn!("skipping undecodable row: {e}"),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_rows_typed() {
        let values = vec![
            json!({"user_owner": "john.doe", "start_date": "2017-09-01", "cost": 100.0}),
            json!({"user_owner": "jane.doe", "start_date": "2017-09-02", "cost": 50.5}),
        ];
        let rows: Vec<TotalSpendRow> = decode_rows(values);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_owner, "john.doe");
        assert!((rows[1].cost - 50.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_rows_skips_missing_field() {
        let values = vec![
            json!({"user_owner": "john.doe", "start_date": "2017-09-01", "cost": 100.0}),
            json!({"user_owner": "john.doe", "cost": 100.0}),
            json!("not even an object"),
        ];
        let rows: Vec<TotalSpendRow> = decode_rows(values);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_raw_record_from_account_row() {
        let row = SpendByAccountRow {
            user_owner: "john.doe".into(),
            account_id: "QA".into(),
            product_name: "Ec2".into(),
            start_date: "2017-09-01 09:00:00".into(),
            cost: 100.0,
        };
        let record = RawRecord::from(row);
        assert_eq!(record.owner, "john.doe");
        assert_eq!(record.dimension.as_deref(), Some("QA"));
        assert_eq!(record.date, "2017-09-01 09:00:00");
    }

    #[test]
    fn test_raw_record_from_total_row_has_no_dimension() {
        let row = TotalSpendRow {
            user_owner: "john.doe".into(),
            start_date: "2017-09-01".into(),
            cost: 1.0,
        };
        assert_eq!(RawRecord::from(row).dimension, None);
    }
}
