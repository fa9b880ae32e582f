//! Evaluation exports.
//!
//! - per-project results as CSV, easy to consume in spreadsheets
//! - a full report (summary + evaluations) as pretty JSON, the portable
//!   record of a run

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Evaluation;
use crate::error::AppError;
use crate::report::HealthSummary;

/// Schema of the JSON report file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub as_of: NaiveDate,
    pub summary: HealthSummary,
    pub evaluations: Vec<Evaluation>,
}

/// Write per-project evaluations to a CSV file.
pub fn write_results_csv(path: &Path, evaluations: &[Evaluation]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "id,name,status,status_defaulted,progress,expected_progress,progress_diff,\
         total_days,days_elapsed,days_remaining,malformed,health"
    )
    .map_err(|e| AppError::input(format!("Failed to write CSV header: {e}")))?;

    for e in evaluations {
        let t = &e.timeline;
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            e.id,
            csv_quote(e.name.as_deref().unwrap_or("")),
            e.status.display_name(),
            e.status_defaulted,
            e.progress,
            t.expected_progress,
            e.progress_diff,
            t.total_days,
            t.days_elapsed,
            t.days_remaining,
            t.malformed,
            e.health.display_name(),
        )
        .map_err(|err| AppError::input(format!("Failed to write CSV row: {err}")))?;
    }

    Ok(())
}

/// Write the full report JSON file.
pub fn write_report_json(
    path: &Path,
    as_of: NaiveDate,
    summary: &HealthSummary,
    evaluations: &[Evaluation],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "Failed to create report JSON '{}': {e}",
            path.display()
        ))
    })?;

    let report = ReportFile {
        tool: "pulse".to_string(),
        as_of,
        summary: summary.clone(),
        evaluations: evaluations.to_vec(),
    };

    serde_json::to_writer_pretty(file, &report)
        .map_err(|e| AppError::input(format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Quote a free-text field if it could break the row.
fn csv_quote(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
