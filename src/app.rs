//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches disease.sh data
//! - derives daily changes
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, PlotArgs, TrendArgs};
use crate::data::HistoricalClient;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `trend` binary.
pub fn run() -> Result<(), AppError> {
    // We want `trend` and `trend -k deaths` to behave like `trend tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(args.request()),
    }
}

fn handle_show(args: TrendArgs) -> Result<(), AppError> {
    let client = HistoricalClient::from_env()?;
    let output = pipeline::run_trend(&client, &args.request())?;

    println!("{}", crate::report::format_summary(&output));
    if args.recent > 0 && !output.points.is_empty() {
        println!("Last {} days:", args.recent.min(output.points.len()));
        println!(
            "{}",
            crate::report::format_table(crate::report::recent(&output.points, args.recent))
        );
    }

    if !args.no_plot {
        println!(
            "{}",
            crate::plot::render_ascii_plot(&output.points, args.width, args.height)
        );
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::export::write_deltas_csv(path, &output)?;
    }
    if let Some(path) = &args.export_chart {
        crate::io::chart::write_chart_json(path, &output.chart_spec())?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let spec = crate::io::chart::read_chart_json(&args.chart)?;

    println!("{} {} ({})", spec.dataset.label, spec.scope, spec.dataset.border_color);
    println!(
        "{}",
        crate::plot::render_ascii_plot(&spec.dataset.data, args.width, args.height)
    );
    Ok(())
}

/// Rewrite argv so `trend` defaults to `trend tui`.
///
/// Rules:
/// - `trend`                      -> `trend tui`
/// - `trend -k deaths ...`        -> `trend tui -k deaths ...`
/// - `trend --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
