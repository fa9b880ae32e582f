//! Command-line parsing for the portfolio health screener.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the evaluation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about = "Construction project portfolio health screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a portfolio and print the full report (summary, table, laggards).
    Report(ReportArgs),
    /// Print only the projects needing attention (useful for scripting).
    Triage(ReportArgs),
    /// Evaluate a single project supplied entirely via flags.
    Check(CheckArgs),
}

/// Common options for portfolio evaluation.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Portfolio file: a JSON array of projects, or CSV (picked by extension).
    #[arg(short = 'i', long, required_unless_present = "sample", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Use a deterministic synthetic portfolio instead of a file.
    #[arg(long)]
    pub sample: bool,

    /// Number of synthetic projects to generate.
    #[arg(long, default_value_t = 40)]
    pub count: usize,

    /// Random seed for the synthetic portfolio.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Show the top-N most-behind projects.
    #[arg(long, default_value_t = 15)]
    pub top: usize,

    /// Export per-project evaluations to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full report (summary + evaluations) to JSON.
    #[arg(long = "export-report", value_name = "JSON")]
    pub export_report: Option<PathBuf>,
}

/// Options for evaluating a single project.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Project id used in the output.
    #[arg(long, default_value = "adhoc")]
    pub id: String,

    /// Optional display name.
    #[arg(long)]
    pub name: Option<String>,

    /// Raw status as the data source would send it: a code ("2"), an English
    /// word ("pending"), or an Arabic word. Omit to exercise the fallback.
    #[arg(short = 's', long)]
    pub status: Option<String>,

    /// Reported completion percentage.
    #[arg(short = 'p', long, default_value_t = 0)]
    pub progress: i64,

    /// Start date. Unparseable values degrade to a flagged result.
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Expected end date. Unparseable values degrade to a flagged result.
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,
}
