//! Per-owner cloud spend rollups with chart-ready cost reports
//!
//! spendtrack ingests flat per-day billing rows, rolls them up into an
//! owner → dimension → day tree, and assembles one report per owner:
//! a chart payload (scaled series, palette colors, axis labels) and a
//! table payload, ready for a rendering back-end.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod format;
pub mod palette;
pub mod query;
pub mod render;
pub mod reports;
pub mod rollup;
pub mod scale;
pub mod sql;
pub mod types;
