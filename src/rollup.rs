//! Rollup tree: owner → optional dimension → day
//!
//! One generic tree serves every report variant. Depth is decided per
//! record: a record with a dimension lands in that dimension's day
//! buckets, a record without one lands in the owner's own day buckets.
//! Totals are always derived from the leaves, never stored.

use crate::calendar::parse_day;
use crate::types::RawRecord;
use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Middle tier of a two-level rollup (a billing account or a resource
/// type, depending on the variant).
#[derive(Debug, Clone)]
pub struct DimensionNode {
    id: String,
    display_name: String,
    days: BTreeMap<NaiveDate, f64>,
}

impl DimensionNode {
    fn new(id: &str, display_name: &str) -> Self {
        DimensionNode {
            id: id.to_string(),
            display_name: display_name.to_string(),
            days: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Friendly name when the lookup knew the id, the raw id otherwise.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Cost on `date`; a day with no record contributes exactly 0.0.
    pub fn day_cost(&self, date: NaiveDate) -> f64 {
        self.days.get(&date).copied().unwrap_or(0.0)
    }

    /// Sum of this dimension's day buckets.
    pub fn total(&self) -> f64 {
        self.days.values().sum()
    }
}

/// Top tier of the rollup. Holds day buckets directly (single-level
/// variants) and/or dimensions (two-level variants).
#[derive(Debug, Clone)]
pub struct OwnerNode {
    owner: String,
    days: BTreeMap<NaiveDate, f64>,
    dimensions: IndexMap<String, DimensionNode>,
}

impl OwnerNode {
    fn new(owner: &str) -> Self {
        OwnerNode {
            owner: owner.to_string(),
            days: BTreeMap::new(),
            dimensions: IndexMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Dimensions in first-seen order.
    pub fn dimensions(&self) -> impl Iterator<Item = &DimensionNode> {
        self.dimensions.values()
    }

    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    /// Total cost: the sum of the direct children's totals.
    pub fn total(&self) -> f64 {
        let own: f64 = self.days.values().sum();
        own + self.dimensions.values().map(DimensionNode::total).sum::<f64>()
    }

    /// Aggregate cost on `date` across all children; 0.0 when absent.
    pub fn daily_total(&self, date: NaiveDate) -> f64 {
        let own = self.days.get(&date).copied().unwrap_or(0.0);
        own + self
            .dimensions
            .values()
            .map(|d| d.day_cost(date))
            .sum::<f64>()
    }
}

/// The full rollup for one report run. Owned by a single variant
/// invocation, discarded after report extraction.
#[derive(Debug, Clone, Default)]
pub struct RollupTree {
    owners: IndexMap<String, OwnerNode>,
}

impl RollupTree {
    /// Owners in first-seen ingestion order.
    pub fn owners(&self) -> impl Iterator<Item = &OwnerNode> {
        self.owners.values()
    }

    pub fn get(&self, owner: &str) -> Option<&OwnerNode> {
        self.owners.get(owner)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Result of one ingestion pass.
#[derive(Debug)]
pub struct IngestOutcome {
    pub tree: RollupTree,
    /// Rows dropped for unparseable dates (not filter misses)
    pub skipped_rows: usize,
}

/// Build a rollup tree from a finite batch of records.
///
/// - Owners not matching `owner_filter` are dropped silently.
/// - Nodes are created on first reference.
/// - Records sharing an (owner, dimension, date) key are summed.
/// - Records with unparseable dates are skipped with a warning.
/// - Dimension display names come from `dimension_names`, falling back
///   to the raw id.
pub fn ingest(
    records: impl IntoIterator<Item = RawRecord>,
    owner_filter: &Regex,
    dimension_names: &HashMap<String, String>,
) -> IngestOutcome {
    let mut tree = RollupTree::default();
    let mut skipped = 0usize;

    for record in records {
        if !owner_filter.is_match(&record.owner) {
            continue;
        }

        let date = match parse_day(&record.date) {
            Ok(date) => date,
            Err(e) => {
                warn!("skipping record for {}: {e}", record.owner);
                skipped += 1;
                continue;
            }
        };

        let owner = tree
            .owners
            .entry(record.owner.clone())
            .or_insert_with(|| OwnerNode::new(&record.owner));

        let days = match &record.dimension {
            Some(id) => {
                let dimension = owner.dimensions.entry(id.clone()).or_insert_with(|| {
                    let display = dimension_names
                        .get(id)
                        .map(String::as_str)
                        .unwrap_or(id.as_str());
                    DimensionNode::new(id, display)
                });
                &mut dimension.days
            }
            None => &mut owner.days,
        };
        *days.entry(date).or_insert(0.0) += record.cost;
    }

    IngestOutcome {
        tree,
        skipped_rows: skipped,
    }
}
