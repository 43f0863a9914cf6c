//! Report run orchestration
//!
//! Wires the variant sets, runs them in parallel (each variant owns its
//! tree exclusively) and folds the results into per-owner groups. A
//! failed variant is reported alongside the others' results; it never
//! aborts the run.

use super::{
    ReportService, ResourceStartedLastWeek, SpendByAccount, SpendByResource, TotalSpendPerOwner,
};
use crate::calendar::Clock;
use crate::config::ReportConfig;
use crate::query::QueryClient;
use crate::types::{OwnerGroup, Report, SpendtrackError};
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{error, info};

/// A variant whose query or assembly failed for this run.
#[derive(Debug)]
pub struct VariantFailure {
    pub variant: &'static str,
    pub error: SpendtrackError,
}

/// Everything one run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub groups: Vec<OwnerGroup>,
    pub failures: Vec<VariantFailure>,
}

/// Builds and runs the configured report variants.
pub struct ReportGenerator {
    employee_services: Vec<Box<dyn ReportService>>,
    admin_services: Vec<Box<dyn ReportService>>,
}

impl ReportGenerator {
    pub fn new(config: &ReportConfig, clock: &dyn Clock) -> Self {
        let employee_services: Vec<Box<dyn ReportService>> = vec![
            Box::new(SpendByResource::new(config, clock)),
            Box::new(SpendByAccount::new(config, clock)),
            Box::new(ResourceStartedLastWeek::new(config, clock)),
        ];
        let admin_services: Vec<Box<dyn ReportService>> = vec![
            Box::new(TotalSpendPerOwner::new(config, clock)),
            Box::new(SpendByAccount::new(config, clock)),
        ];
        ReportGenerator {
            employee_services,
            admin_services,
        }
    }

    /// Per-owner reports mailed to the owners themselves.
    pub fn employee_reports(&self, client: &dyn QueryClient) -> RunOutcome {
        info!("generating employee reports");
        Self::run(&self.employee_services, client)
    }

    /// The overview set for administrators.
    pub fn admin_reports(&self, client: &dyn QueryClient) -> RunOutcome {
        info!("generating admin reports");
        Self::run(&self.admin_services, client)
    }

    fn run(services: &[Box<dyn ReportService>], client: &dyn QueryClient) -> RunOutcome {
        let results: Vec<(&'static str, _)> = services
            .par_iter()
            .map(|service| (service.name(), service.reports(client)))
            .collect();

        let mut reports = Vec::new();
        let mut failures = Vec::new();
        for (variant, result) in results {
            match result {
                Ok(mut batch) => reports.append(&mut batch),
                Err(e) => {
                    error!("variant {variant} failed: {e}");
                    failures.push(VariantFailure { variant, error: e });
                }
            }
        }
        info!("total reports generated: {}", reports.len());

        RunOutcome {
            groups: group_by_owner(reports),
            failures,
        }
    }
}

/// Fold a flat report list into per-owner groups, owners in first-seen
/// order, each group's reports in production order.
pub fn group_by_owner(reports: Vec<Report>) -> Vec<OwnerGroup> {
    let mut groups: IndexMap<String, OwnerGroup> = IndexMap::new();
    for report in reports {
        groups
            .entry(report.owner.clone())
            .or_insert_with(|| OwnerGroup::new(report.owner.clone()))
            .reports
            .push(report);
    }
    groups.into_values().collect()
}
