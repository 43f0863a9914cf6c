use crate::calendar::{Clock, SystemClock};
use crate::config::{read_account_names, ConfigValues, ReportConfig};
use crate::query::JsonlFileClient;
use crate::render::{ChartRenderer, GoogleChartRenderer, HtmlTableRenderer, TableRenderer};
use crate::reports::{
    ReportService, ResourceStartedLastWeek, SpendByAccount, SpendByResource, TotalSpendPerOwner,
};
use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

/// Per-owner cloud spend reports from flat billing rows
#[derive(Parser)]
#[command(name = "spendtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RunArgs {
    /// Query result rows, one JSON object per line
    #[arg(long)]
    records: PathBuf,

    /// Owner allow-list pattern; must match the whole owner id
    #[arg(long, default_value = ".*")]
    owner_filter: String,

    /// Exclude owners whose total cost is below this
    #[arg(long)]
    threshold: Option<f64>,

    /// Lookback window length in days
    #[arg(long, default_value_t = 30)]
    days_back: u32,

    /// account-id,account-name CSV for friendly account labels
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Output reports as JSON instead of chart URL + HTML table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Total spend per owner
    Total(RunArgs),

    /// Spend per owner broken down by resource type
    ByResource(RunArgs),

    /// Spend per owner broken down by billing account
    ByAccount(RunArgs),

    /// Resources started during the past week
    StartedLastWeek(RunArgs),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        match self.command {
            Commands::Total(args) => execute(args, |config, clock| {
                Box::new(TotalSpendPerOwner::new(config, clock))
            }),
            Commands::ByResource(args) => execute(args, |config, clock| {
                Box::new(SpendByResource::new(config, clock))
            }),
            Commands::ByAccount(args) => execute(args, |config, clock| {
                Box::new(SpendByAccount::new(config, clock))
            }),
            Commands::StartedLastWeek(args) => execute(args, |config, clock| {
                Box::new(ResourceStartedLastWeek::new(config, clock))
            }),
        }
    }
}

fn execute(
    args: RunArgs,
    build: impl FnOnce(&ReportConfig, &dyn Clock) -> Box<dyn ReportService>,
) -> anyhow::Result<()> {
    let account_names = match &args.accounts {
        Some(path) => read_account_names(path)?,
        None => HashMap::new(),
    };
    let config = ReportConfig::new(
        ConfigValues {
            user_owner_regexp: args.owner_filter,
            report_threshold: args.threshold,
            days_back: args.days_back,
            // The file-backed client ignores the SQL text
            sql_database_name: "billing".into(),
            sql_table_name: "line_items".into(),
        },
        account_names,
    )?;

    let service = build(&config, &SystemClock);
    let client = JsonlFileClient::new(&args.records);
    let reports = service.reports(&client)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        let charts = GoogleChartRenderer::new();
        let tables = HtmlTableRenderer::new();
        for report in &reports {
            println!("== {}", report.owner);
            if let Some(chart) = &report.chart {
                println!("{}", charts.render(chart));
            }
            if let Some(table) = &report.table {
                println!("{}", tables.render(table));
            }
        }
    }
    Ok(())
}
