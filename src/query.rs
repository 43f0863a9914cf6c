//! Query collaborator boundary
//!
//! The engine treats a query result as an opaque finite batch of rows.
//! Connection management, retries and timeouts live behind this trait,
//! outside the core.

use crate::types::{Result, SpendtrackError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// Executes an analytic query and returns its rows.
pub trait QueryClient: Send + Sync {
    fn execute(&self, sql: &str) -> Result<Vec<serde_json::Value>>;
}

/// Serves rows from a JSONL file, one JSON object per line. The SQL
/// text is ignored; useful for the CLI and for offline report runs
/// against exported query results.
#[derive(Debug, Clone)]
pub struct JsonlFileClient {
    path: PathBuf,
}

impl JsonlFileClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonlFileClient { path: path.into() }
    }
}

impl QueryClient for JsonlFileClient {
    fn execute(&self, _sql: &str) -> Result<Vec<serde_json::Value>> {
        let file = File::open(&self.path)
            .map_err(|e| SpendtrackError::Query(format!("{}: {e}", self.path.display())))?;

        let mut rows = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let value = serde_json::from_str(&line).map_err(|e| {
                SpendtrackError::Parse(format!(
                    "{}:{}: {e}",
                    self.path.display(),
                    number + 1
                ))
            })?;
            rows.push(value);
        }
        Ok(rows)
    }
}

/// In-memory rows, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticQueryClient {
    rows: Vec<serde_json::Value>,
}

impl StaticQueryClient {
    pub fn new(rows: Vec<serde_json::Value>) -> Self {
        StaticQueryClient { rows }
    }
}

impl QueryClient for StaticQueryClient {
    fn execute(&self, _sql: &str) -> Result<Vec<serde_json::Value>> {
        Ok(self.rows.clone())
    }
}
