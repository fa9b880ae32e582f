//! Whole-day schedule arithmetic.
//!
//! Given a start date, an expected end date, and an injected as-of date, this
//! module derives elapsed/remaining day counts and the linear expected
//! progress percentage.
//!
//! Failure semantics: there are none, by contract. Malformed input (end not
//! after start, or an absent date) fails closed — `total_days = 0`,
//! `days_remaining = 0`, `expected_progress = 100`, `malformed = true` — and
//! the caller decides whether to surface a warning.

use chrono::NaiveDate;

use crate::domain::Timeline;

/// Fail-closed result for malformed date input.
///
/// `expected_progress = 100` means a project with bad dates is judged purely
/// against its reported progress.
fn malformed_timeline() -> Timeline {
    Timeline {
        total_days: 0,
        days_elapsed: 0,
        days_remaining: 0,
        expected_progress: 100,
        malformed: true,
    }
}

/// Compute the schedule timeline for one project.
pub fn compute(
    start: Option<NaiveDate>,
    expected_end: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Timeline {
    let (Some(start), Some(end)) = (start, expected_end) else {
        return malformed_timeline();
    };

    let total_days = (end - start).num_days();
    if total_days <= 0 {
        return malformed_timeline();
    }

    let days_elapsed = (as_of - start).num_days().clamp(0, total_days);
    let days_remaining = (end - as_of).num_days();

    // Integer rounding of 100 * elapsed / total, half away from zero.
    // Operands are non-negative here so this is plain round-half-up.
    let expected_progress = ((200 * days_elapsed + total_days) / (2 * total_days)).clamp(0, 100);

    Timeline {
        total_days,
        days_elapsed,
        days_remaining,
        expected_progress,
        malformed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn midpoint_is_fifty_percent() {
        // 10-day project, 5 days in.
        let t = compute(Some(d(2024, 1, 1)), Some(d(2024, 1, 11)), d(2024, 1, 6));
        assert_eq!(t.total_days, 10);
        assert_eq!(t.days_elapsed, 5);
        assert_eq!(t.days_remaining, 5);
        assert_eq!(t.expected_progress, 50);
        assert!(!t.malformed);
    }

    #[test]
    fn before_start_clamps_elapsed_to_zero() {
        let t = compute(Some(d(2024, 3, 1)), Some(d(2024, 4, 1)), d(2024, 2, 1));
        assert_eq!(t.days_elapsed, 0);
        assert_eq!(t.expected_progress, 0);
        assert_eq!(t.days_remaining, 60);
        assert!(!t.malformed);
    }

    #[test]
    fn past_end_clamps_elapsed_and_goes_negative_remaining() {
        let t = compute(Some(d(2024, 1, 1)), Some(d(2024, 1, 11)), d(2024, 1, 21));
        assert_eq!(t.days_elapsed, 10);
        assert_eq!(t.expected_progress, 100);
        assert_eq!(t.days_remaining, -10);
        assert!(!t.malformed);
    }

    #[test]
    fn expected_progress_rounds_half_up() {
        // 3-day project, 2 days in: 66.67 -> 67.
        let t = compute(Some(d(2024, 1, 1)), Some(d(2024, 1, 4)), d(2024, 1, 3));
        assert_eq!(t.expected_progress, 67);

        // 8-day project, 1 day in: 12.5 -> 13.
        let t = compute(Some(d(2024, 1, 1)), Some(d(2024, 1, 9)), d(2024, 1, 2));
        assert_eq!(t.expected_progress, 13);
    }

    #[test]
    fn expected_progress_stays_in_range() {
        let start = d(2024, 1, 1);
        let end = d(2024, 7, 1);
        let mut as_of = d(2023, 11, 1);
        while as_of < d(2024, 9, 1) {
            let t = compute(Some(start), Some(end), as_of);
            assert!((0..=100).contains(&t.expected_progress), "as_of {as_of}");
            assert!(!t.malformed);
            as_of = as_of + chrono::Days::new(7);
        }
    }

    #[test]
    fn end_equal_to_start_is_malformed() {
        let t = compute(Some(d(2024, 1, 1)), Some(d(2024, 1, 1)), d(2024, 1, 1));
        assert!(t.malformed);
        assert_eq!(t.total_days, 0);
        assert_eq!(t.days_remaining, 0);
        assert_eq!(t.expected_progress, 100);
    }

    #[test]
    fn end_before_start_is_malformed() {
        let t = compute(Some(d(2024, 2, 1)), Some(d(2024, 1, 1)), d(2024, 1, 15));
        assert!(t.malformed);
        assert_eq!(t.expected_progress, 100);
    }

    #[test]
    fn absent_dates_are_malformed() {
        let today = d(2024, 1, 1);
        assert!(compute(None, Some(d(2024, 2, 1)), today).malformed);
        assert!(compute(Some(d(2024, 1, 1)), None, today).malformed);
        assert!(compute(None, None, today).malformed);
    }
}
