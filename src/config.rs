//! Run configuration
//!
//! Contract errors (bad regex, negative threshold, empty window) are
//! rejected here, before any row is read. How the values reach the
//! process (YAML file, CLI flags, environment) is the caller's concern.

use crate::types::{Result, SpendtrackError};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Raw configuration values as a loader produces them.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigValues {
    pub user_owner_regexp: String,
    /// Unset means no filtering
    #[serde(default)]
    pub report_threshold: Option<f64>,
    #[serde(default = "default_days_back")]
    pub days_back: u32,
    pub sql_database_name: String,
    pub sql_table_name: String,
}

fn default_days_back() -> u32 {
    30
}

/// Validated configuration for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Owner allow-list. Compiled anchored: the pattern must match the
    /// whole owner id, not a substring.
    pub owner_filter: Regex,
    pub threshold: f64,
    pub days_back: u32,
    pub database: String,
    pub table: String,
    /// account-id → display-name lookup; empty is fine
    pub account_names: HashMap<String, String>,
}

impl ReportConfig {
    pub fn new(values: ConfigValues, account_names: HashMap<String, String>) -> Result<Self> {
        let threshold = values.report_threshold.unwrap_or(0.0);
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(SpendtrackError::Config(format!(
                "report threshold must be a non-negative number, got {threshold}"
            )));
        }
        if values.days_back == 0 {
            return Err(SpendtrackError::Config(
                "days_back must be at least 1".into(),
            ));
        }
        let owner_filter = Regex::new(&format!("^(?:{})$", values.user_owner_regexp))
            .map_err(|e| SpendtrackError::Config(format!("invalid owner filter: {e}")))?;

        Ok(ReportConfig {
            owner_filter,
            threshold,
            days_back: values.days_back,
            database: values.sql_database_name,
            table: values.sql_table_name,
            account_names,
        })
    }
}

/// Read an account-id → display-name CSV (two columns, no header).
///
/// The file is optional upstream; callers pass an empty map when it is
/// absent. A malformed line fails the whole load.
pub fn read_account_names(path: &Path) -> Result<HashMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SpendtrackError::Parse(format!("accounts csv: {e}")))?;

    let mut names = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| SpendtrackError::Parse(format!("accounts csv: {e}")))?;
        let id = record
            .get(0)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SpendtrackError::Parse("accounts csv: missing account id".into()))?;
        let name = record
            .get(1)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SpendtrackError::Parse("accounts csv: missing account name".into()))?;
        names.insert(id.to_string(), name.to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn values(pattern: &str, threshold: Option<f64>, days_back: u32) -> ConfigValues {
        ConfigValues {
            user_owner_regexp: pattern.into(),
            report_threshold: threshold,
            days_back,
            sql_database_name: "billing".into(),
            sql_table_name: "line_items".into(),
        }
    }

    #[test]
    fn test_unset_threshold_means_no_filtering() {
        let config = ReportConfig::new(values(".*", None, 30), HashMap::new()).unwrap();
        assert_eq!(config.threshold, 0.0);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = ReportConfig::new(values(".*", Some(-1.0), 30), HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("config error"));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        assert!(ReportConfig::new(values(".*", Some(f64::NAN), 30), HashMap::new()).is_err());
    }

    #[test]
    fn test_zero_days_back_rejected() {
        assert!(ReportConfig::new(values(".*", None, 0), HashMap::new()).is_err());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        assert!(ReportConfig::new(values("(", None, 30), HashMap::new()).is_err());
    }

    #[test]
    fn test_owner_filter_matches_whole_id() {
        let config = ReportConfig::new(values(r"john\.doe", None, 30), HashMap::new()).unwrap();
        assert!(config.owner_filter.is_match("john.doe"));
        assert!(!config.owner_filter.is_match("jane.doe"));
        assert!(!config.owner_filter.is_match("john.doe.extra"));
    }

    #[test]
    fn test_read_account_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "123456789,QA Account").unwrap();
        writeln!(file, "987654321, Nova ").unwrap();
        file.flush().unwrap();

        let names = read_account_names(file.path()).unwrap();
        assert_eq!(names.get("123456789").unwrap(), "QA Account");
        assert_eq!(names.get("987654321").unwrap(), "Nova");
    }

    #[test]
    fn test_read_account_names_rejects_missing_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "123456789").unwrap();
        file.flush().unwrap();

        assert!(read_account_names(file.path()).is_err());
    }
}
