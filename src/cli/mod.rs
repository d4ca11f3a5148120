//! Command-line parsing for the disease.sh trend viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the series/chart code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{CaseKind, DEFAULT_LAST_DAYS, Scope, TrendRequest};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trend", version, about = "Daily case/recovery/death changes from disease.sh")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a trend, print the summary and recent days, and optionally plot/export.
    Show(TrendArgs),
    /// Plot a previously exported chart JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same pipeline as `trend show`, but renders the chart in a
    /// terminal UI using Ratatui.
    Tui(TrendArgs),
}

/// Common options for selecting a trend.
#[derive(Debug, Parser, Clone)]
pub struct TrendArgs {
    /// Which series to chart (cases, recovered, deaths).
    #[arg(short = 'k', long, value_enum, default_value_t = CaseKind::Cases)]
    pub kind: CaseKind,

    /// Country name or ISO code (omit for global totals).
    #[arg(short = 'c', long)]
    pub country: Option<String>,

    /// Number of days to fetch (`lastdays`).
    #[arg(short = 'd', long, default_value_t = DEFAULT_LAST_DAYS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub days: u32,

    /// Number of most recent days to list.
    #[arg(long, default_value_t = 14)]
    pub recent: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export daily changes to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the chart description (points + colours + options) to JSON.
    #[arg(long = "export-chart")]
    pub export_chart: Option<PathBuf>,
}

impl TrendArgs {
    pub fn request(&self) -> TrendRequest {
        TrendRequest {
            kind: self.kind,
            scope: Scope::from_country(self.country.as_deref()),
            last_days: self.days,
        }
    }
}

/// Options for plotting a saved chart.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Chart JSON file produced by `trend show --export-chart`.
    #[arg(long, value_name = "JSON")]
    pub chart: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
