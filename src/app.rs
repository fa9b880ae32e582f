//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates the portfolio
//! - runs status normalization, schedule arithmetic, and health classification
//! - prints reports
//! - writes optional exports

use chrono::NaiveDate;
use clap::Parser;

use crate::cli::{CheckArgs, Command, ReportArgs};
use crate::domain::{HealthLabel, PortfolioSource, ProjectSnapshot, RawStatus, RunConfig};
use crate::error::AppError;
use crate::io::ingest::parse_date_lenient;

pub mod pipeline;

/// Entry point for the `pulse` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Report(args) => handle_report(args, OutputMode::Full),
        Command::Triage(args) => handle_report(args, OutputMode::TriageOnly),
        Command::Check(args) => handle_check(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    TriageOnly,
}

fn handle_report(args: ReportArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_evaluation(&config)?;

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_summary(&run.ingest, &run.summary, &config)
            );
            println!("{}", crate::report::format_health_table(&run.evaluations));
            println!("{}", crate::report::format_laggards(&run.laggards));
        }
        OutputMode::TriageOnly => {
            let flagged: Vec<_> = run
                .evaluations
                .iter()
                .filter(|e| e.health != HealthLabel::Good)
                .cloned()
                .collect();
            println!("{}", crate::report::format_health_table(&flagged));
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.evaluations)?;
    }
    if let Some(path) = &config.export_report {
        crate::io::export::write_report_json(path, config.as_of, &run.summary, &run.evaluations)?;
    }

    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let snapshot = ProjectSnapshot {
        id: args.id,
        name: args.name,
        status_raw: args.status.map(RawStatus::Text),
        progress: args.progress,
        start_date: args.start.as_deref().and_then(parse_date_lenient),
        expected_end_date: args.end.as_deref().and_then(parse_date_lenient),
    };

    let as_of = resolve_as_of(args.as_of);
    let evaluation = pipeline::evaluate_snapshot(&snapshot, as_of);
    print!("{}", crate::report::format_single(&evaluation));

    Ok(())
}

fn run_config_from_args(args: &ReportArgs) -> RunConfig {
    let source = match &args.input {
        Some(path) => PortfolioSource::File(path.clone()),
        // clap guarantees --sample when --input is absent.
        None => PortfolioSource::Sample {
            count: args.count,
            seed: args.seed,
        },
    };

    RunConfig {
        source,
        as_of: resolve_as_of(args.as_of),
        top_n: args.top,
        export_results: args.export.clone(),
        export_report: args.export_report.clone(),
    }
}

/// The one place that reads the clock; everything downstream gets an
/// explicit date.
fn resolve_as_of(flag: Option<NaiveDate>) -> NaiveDate {
    flag.unwrap_or_else(|| chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn input_flag_wins_over_sample_defaults() {
        let args = ReportArgs {
            input: Some(PathBuf::from("portfolio.json")),
            sample: false,
            count: 40,
            seed: 42,
            as_of: NaiveDate::from_ymd_opt(2025, 6, 1),
            top: 15,
            export: None,
            export_report: None,
        };
        let config = run_config_from_args(&args);
        assert_eq!(
            config.source,
            PortfolioSource::File(PathBuf::from("portfolio.json"))
        );
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn sample_source_carries_count_and_seed() {
        let args = ReportArgs {
            input: None,
            sample: true,
            count: 12,
            seed: 7,
            as_of: None,
            top: 15,
            export: None,
            export_report: None,
        };
        let config = run_config_from_args(&args);
        assert_eq!(config.source, PortfolioSource::Sample { count: 12, seed: 7 });
    }
}
