//! Shared evaluation pipeline used by every command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> normalize status -> schedule arithmetic -> classify -> summarize
//!
//! The commands then focus on presentation (which tables to print, what to
//! export).

use crate::data::generate_portfolio;
use crate::domain::{Evaluation, PortfolioSource, ProjectSnapshot, RunConfig};
use crate::error::AppError;
use crate::io::ingest::{IngestedPortfolio, load_portfolio};
use crate::report::{HealthSummary, rank_laggards};
use chrono::NaiveDate;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedPortfolio,
    pub evaluations: Vec<Evaluation>,
    pub summary: HealthSummary,
    pub laggards: Vec<Evaluation>,
}

/// Evaluate one snapshot against an as-of date.
///
/// Infallible by design: degraded input (unmapped status, bad dates) comes
/// out as flags on the result, never as an error.
pub fn evaluate_snapshot(snapshot: &ProjectSnapshot, as_of: NaiveDate) -> Evaluation {
    let normalized = crate::status::normalize(snapshot.status_raw.as_ref());
    let timeline = crate::schedule::compute(snapshot.start_date, snapshot.expected_end_date, as_of);

    let progress = snapshot.progress.clamp(0, 100);
    let progress_diff = progress - timeline.expected_progress;
    let health = crate::health::classify(normalized.status, progress, timeline.expected_progress);

    Evaluation {
        id: snapshot.id.clone(),
        name: snapshot.name.clone(),
        status: normalized.status,
        status_defaulted: normalized.defaulted,
        progress,
        timeline,
        progress_diff,
        health,
    }
}

/// Execute the full pipeline for a run configuration.
pub fn run_evaluation(config: &RunConfig) -> Result<RunOutput, AppError> {
    // 1) Acquire snapshots.
    let ingest = match &config.source {
        PortfolioSource::File(path) => load_portfolio(path)?,
        PortfolioSource::Sample { count, seed } => {
            let snapshots = generate_portfolio(*count, *seed, config.as_of)?;
            IngestedPortfolio::from_snapshots(snapshots)
        }
    };

    // 2) Evaluate every snapshot.
    let evaluations: Vec<Evaluation> = ingest
        .snapshots
        .iter()
        .map(|s| evaluate_snapshot(s, config.as_of))
        .collect();

    // 3) Summarize and rank.
    let summary = HealthSummary::from_evaluations(&evaluations);
    let laggards = rank_laggards(&evaluations, config.top_n);

    Ok(RunOutput {
        ingest,
        evaluations,
        summary,
        laggards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CanonicalStatus, HealthLabel, RawStatus};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn snapshot(status: Option<RawStatus>, progress: i64) -> ProjectSnapshot {
        ProjectSnapshot {
            id: "P-1".to_string(),
            name: None,
            status_raw: status,
            progress,
            start_date: Some(d(2024, 1, 1)),
            expected_end_date: Some(d(2024, 1, 11)),
        }
    }

    #[test]
    fn end_to_end_twenty_behind_is_critical() {
        // 10-day project, 5 elapsed -> expected 50; actual 30 -> diff -20.
        let s = snapshot(Some(RawStatus::Text("active".to_string())), 30);
        let e = evaluate_snapshot(&s, d(2024, 1, 6));

        assert_eq!(e.status, CanonicalStatus::Active);
        assert_eq!(e.timeline.expected_progress, 50);
        assert_eq!(e.progress_diff, -20);
        assert_eq!(e.health, HealthLabel::Critical);
        assert!(!e.timeline.malformed);
        assert!(!e.status_defaulted);
    }

    #[test]
    fn progress_is_clamped_before_classification() {
        let s = snapshot(Some(RawStatus::Code(1)), 140);
        let e = evaluate_snapshot(&s, d(2024, 1, 6));
        assert_eq!(e.progress, 100);
        assert_eq!(e.progress_diff, 50);
        assert_eq!(e.health, HealthLabel::Good);
    }

    #[test]
    fn arabic_status_flows_through_the_pipeline() {
        let s = snapshot(Some(RawStatus::Text("مكتمل".to_string())), 10);
        let e = evaluate_snapshot(&s, d(2024, 1, 6));
        assert_eq!(e.status, CanonicalStatus::Completed);
        // Completed dominates the 40-point gap.
        assert_eq!(e.health, HealthLabel::Good);
    }

    #[test]
    fn malformed_dates_fail_closed_into_the_result() {
        let mut s = snapshot(None, 50);
        s.expected_end_date = s.start_date;
        let e = evaluate_snapshot(&s, d(2024, 1, 6));

        assert!(e.timeline.malformed);
        assert!(e.status_defaulted);
        assert_eq!(e.timeline.expected_progress, 100);
        assert_eq!(e.progress_diff, -50);
        assert_eq!(e.health, HealthLabel::Critical);
    }

    #[test]
    fn sample_run_produces_consistent_output() {
        let config = RunConfig {
            source: PortfolioSource::Sample {
                count: 60,
                seed: 42,
            },
            as_of: d(2025, 6, 1),
            top_n: 5,
            export_results: None,
            export_report: None,
        };

        let run = run_evaluation(&config).unwrap();
        assert_eq!(run.evaluations.len(), 60);
        assert_eq!(run.summary.total, 60);
        assert_eq!(
            run.summary.total,
            run.summary.good + run.summary.warning + run.summary.critical
        );
        assert!(run.laggards.len() <= 5);
        // The sample deliberately includes schedule-broken rows.
        assert!(run.summary.malformed > 0);

        // Laggards are sorted worst-first.
        for pair in run.laggards.windows(2) {
            assert!(pair[0].progress_diff <= pair[1].progress_diff);
        }
    }
}
