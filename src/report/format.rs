//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the evaluation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{Evaluation, PortfolioSource, RunConfig};
use crate::io::ingest::IngestedPortfolio;
use crate::report::HealthSummary;

/// Format the run header: source, as-of date, row counts, health totals,
/// and any ingest warnings.
pub fn format_run_summary(
    ingest: &IngestedPortfolio,
    summary: &HealthSummary,
    config: &RunConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== pulse - Project Portfolio Health ===\n");
    let source = match &config.source {
        PortfolioSource::File(path) => path.display().to_string(),
        PortfolioSource::Sample { count, seed } => {
            format!("synthetic sample (n={count}, seed={seed})")
        }
    };
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!("As-of: {}\n", config.as_of));
    out.push_str(&format!(
        "Projects: {} used / {} read\n",
        ingest.rows_used, ingest.rows_read
    ));

    out.push_str(&format!(
        "\nHealth: good={} warning={} critical={}\n",
        summary.good, summary.warning, summary.critical
    ));
    out.push_str(&format!("Overdue: {}\n", summary.overdue));
    if summary.malformed > 0 {
        out.push_str(&format!(
            "Schedule data problems (fail-closed): {}\n",
            summary.malformed
        ));
    }
    if summary.status_defaulted > 0 {
        out.push_str(&format!(
            "Unrecognized statuses (assumed active): {}\n",
            summary.status_defaulted
        ));
    }

    if !ingest.row_errors.is_empty() {
        out.push_str(&format!("\nRejected rows ({}):\n", ingest.row_errors.len()));
        for err in &ingest.row_errors {
            let id = err.id.as_deref().unwrap_or("?");
            out.push_str(&format!("  row {} [{}]: {}\n", err.row, id, err.message));
        }
    }

    out
}

/// Format the per-project table.
///
/// The `!` column marks rows evaluated from degraded input: `d` means the
/// raw status was unmapped (defaulted to active), `m` means the schedule
/// arithmetic failed closed on bad dates.
pub fn format_health_table(evaluations: &[Evaluation]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:<22} {:<10} {:>6} {:>6} {:>6} {:>9} {:>2} {:<8}\n",
        "id", "name", "status", "act%", "exp%", "diff", "days_left", "!", "health"
    ));
    out.push_str(&format!(
        "{:-<12} {:-<22} {:-<10} {:-<6} {:-<6} {:-<6} {:-<9} {:-<2} {:-<8}\n",
        "", "", "", "", "", "", "", "", ""
    ));

    for e in evaluations {
        out.push_str(&format_row(e));
        out.push('\n');
    }

    out
}

fn format_row(e: &Evaluation) -> String {
    let mut flags = String::new();
    if e.status_defaulted {
        flags.push('d');
    }
    if e.timeline.malformed {
        flags.push('m');
    }

    format!(
        "{:<12} {:<22} {:<10} {:>6} {:>6} {:>+6} {:>9} {:>2} {:<8}",
        truncate(&e.id, 12),
        truncate(e.name.as_deref().unwrap_or(""), 22),
        e.status.display_name(),
        e.progress,
        e.timeline.expected_progress,
        e.progress_diff,
        e.timeline.days_remaining,
        flags,
        e.health.display_name(),
    )
    .trim_end()
    .to_string()
}

/// Format the most-behind table (header + rows).
pub fn format_laggards(laggards: &[Evaluation]) -> String {
    let mut out = String::new();

    out.push_str("Most behind schedule:\n");
    if laggards.is_empty() {
        out.push_str("  (none - every open project is on track)\n");
        return out;
    }
    out.push_str(&format_health_table(laggards));
    out
}

/// Format one evaluation as a multi-line record (for `pulse check`).
pub fn format_single(e: &Evaluation) -> String {
    let mut out = String::new();

    out.push_str(&format!("id: {}\n", e.id));
    if let Some(name) = &e.name {
        out.push_str(&format!("name: {name}\n"));
    }
    out.push_str(&format!(
        "status: {}{}\n",
        e.status.display_name(),
        if e.status_defaulted {
            " (defaulted from unrecognized input)"
        } else {
            ""
        }
    ));
    out.push_str(&format!("progress: {}% actual", e.progress));
    out.push_str(&format!(
        " vs {}% expected ({:+})\n",
        e.timeline.expected_progress, e.progress_diff
    ));
    if e.timeline.malformed {
        out.push_str("schedule: malformed dates (fail-closed: treated as fully elapsed)\n");
    } else {
        out.push_str(&format!(
            "schedule: day {}/{} ({} days remaining)\n",
            e.timeline.days_elapsed, e.timeline.total_days, e.timeline.days_remaining
        ));
    }
    out.push_str(&format!("health: {}\n", e.health.display_name()));

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
