//! Reporting utilities: summaries, laggard rankings, and formatted output.

mod format;

pub use format::*;

use serde::{Deserialize, Serialize};

use crate::domain::{Evaluation, HealthLabel};

/// Portfolio-level counts derived from a set of evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total: usize,
    pub good: usize,
    pub warning: usize,
    pub critical: usize,
    /// Projects past their expected end date and not completed/cancelled.
    pub overdue: usize,
    /// Projects with fail-closed schedule arithmetic (bad/absent dates).
    pub malformed: usize,
    /// Projects whose raw status was unmapped and fell back to Active.
    pub status_defaulted: usize,
}

impl HealthSummary {
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Self {
        let mut summary = Self {
            total: evaluations.len(),
            good: 0,
            warning: 0,
            critical: 0,
            overdue: 0,
            malformed: 0,
            status_defaulted: 0,
        };

        for e in evaluations {
            match e.health {
                HealthLabel::Good => summary.good += 1,
                HealthLabel::Warning => summary.warning += 1,
                HealthLabel::Critical => summary.critical += 1,
            }
            if e.is_overdue() {
                summary.overdue += 1;
            }
            if e.timeline.malformed {
                summary.malformed += 1;
            }
            if e.status_defaulted {
                summary.status_defaulted += 1;
            }
        }

        summary
    }
}

/// Rank the most-behind projects: worst `progress_diff` first, ties broken
/// by days overdue, then by id for determinism.
///
/// Completed and cancelled projects are excluded — there is nothing left to
/// chase on them.
pub fn rank_laggards(evaluations: &[Evaluation], top_n: usize) -> Vec<Evaluation> {
    let mut behind: Vec<Evaluation> = evaluations
        .iter()
        .filter(|e| e.is_rankable())
        .cloned()
        .collect();

    behind.sort_by(|a, b| {
        a.progress_diff
            .cmp(&b.progress_diff)
            .then(a.timeline.days_remaining.cmp(&b.timeline.days_remaining))
            .then(a.id.cmp(&b.id))
    });

    behind.truncate(top_n);
    behind
}

impl Evaluation {
    /// Past the expected end with work still open.
    pub fn is_overdue(&self) -> bool {
        use crate::domain::CanonicalStatus::{Cancelled, Completed};
        self.timeline.days_remaining < 0 && !matches!(self.status, Completed | Cancelled)
    }

    fn is_rankable(&self) -> bool {
        use crate::domain::CanonicalStatus::{Cancelled, Completed};
        !matches!(self.status, Completed | Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CanonicalStatus, Timeline};

    fn eval(id: &str, status: CanonicalStatus, diff: i64, remaining: i64) -> Evaluation {
        Evaluation {
            id: id.to_string(),
            name: None,
            status,
            status_defaulted: false,
            progress: 50,
            timeline: Timeline {
                total_days: 100,
                days_elapsed: 50,
                days_remaining: remaining,
                expected_progress: (50 - diff).clamp(0, 100),
                malformed: false,
            },
            progress_diff: diff,
            health: crate::health::classify(status, 50, (50 - diff).clamp(0, 100)),
        }
    }

    #[test]
    fn summary_counts_every_bucket() {
        let evals = vec![
            eval("A", CanonicalStatus::Active, 0, 10),
            eval("B", CanonicalStatus::Active, -15, -3),
            eval("C", CanonicalStatus::Delayed, -30, -40),
            eval("D", CanonicalStatus::Completed, 0, -60),
        ];
        let s = HealthSummary::from_evaluations(&evals);
        assert_eq!(s.total, 4);
        assert_eq!(s.good, 2);
        assert_eq!(s.warning, 1);
        assert_eq!(s.critical, 1);
        // D is past end but completed, so only B and C count.
        assert_eq!(s.overdue, 2);
        assert_eq!(s.malformed, 0);
    }

    #[test]
    fn laggards_sort_worst_diff_first_and_skip_closed() {
        let evals = vec![
            eval("A", CanonicalStatus::Active, -5, 10),
            eval("B", CanonicalStatus::Active, -25, 3),
            eval("C", CanonicalStatus::Completed, -90, -60),
            eval("D", CanonicalStatus::Pending, -25, -8),
            eval("E", CanonicalStatus::Cancelled, -40, 0),
        ];

        let top = rank_laggards(&evals, 10);
        let ids: Vec<&str> = top.iter().map(|e| e.id.as_str()).collect();
        // D ties B on diff but is overdue, so it ranks worse.
        assert_eq!(ids, vec!["D", "B", "A"]);

        let top1 = rank_laggards(&evals, 1);
        assert_eq!(top1.len(), 1);
        assert_eq!(top1[0].id, "D");
    }
}
