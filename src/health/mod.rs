//! Health classification.
//!
//! Combines canonical status, actual progress, and expected progress into a
//! three-level label. Pure and total: every input combination yields a label.
//!
//! Threshold rule (single source of truth, applied at every call site):
//!
//! - `diff <= -20` → Critical
//! - `-20 < diff < -10` → Warning
//! - `diff >= -10` → Good
//!
//! where `diff = actual - expected`. The boundaries are deliberately uneven:
//! exactly 20 points behind already counts as Critical, while exactly 10
//! points behind still counts as Good.

use crate::domain::{CanonicalStatus, HealthLabel};

/// Diff at or below this is Critical.
const CRITICAL_DIFF: i64 = -20;

/// Diff at or above this is Good.
const GOOD_DIFF: i64 = -10;

/// Classify one project's schedule health.
///
/// Status dominates: a completed project is Good and a delayed or cancelled
/// one is Critical regardless of the progress numbers. Only Active and
/// Pending projects are judged by the progress gap.
pub fn classify(status: CanonicalStatus, actual: i64, expected: i64) -> HealthLabel {
    match status {
        CanonicalStatus::Completed => HealthLabel::Good,
        CanonicalStatus::Delayed | CanonicalStatus::Cancelled => HealthLabel::Critical,
        CanonicalStatus::Active | CanonicalStatus::Pending => {
            let diff = actual.clamp(0, 100) - expected;
            if diff <= CRITICAL_DIFF {
                HealthLabel::Critical
            } else if diff < GOOD_DIFF {
                HealthLabel::Warning
            } else {
                HealthLabel::Good
            }
        }
    }
}
