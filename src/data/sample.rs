//! Synthetic portfolio generation.
//!
//! Produces a deterministic mix of projects that exercises every path the
//! evaluator has: all five canonical statuses, all three raw-status
//! representations (codes, English, Arabic), on-track/behind/overdue
//! schedules, and a couple of malformed rows. Useful for demos
//! (`pulse report --sample`) and for end-to-end tests without fixture files.

use chrono::{Days, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::{ProjectSnapshot, RawStatus};
use crate::error::AppError;

/// Site names cycled through for readable demo output.
const SITE_NAMES: [&str; 8] = [
    "Harbor Tower",
    "North Depot",
    "Riverside Villas",
    "Central Clinic",
    "Westgate Mall",
    "Quarry Road Bridge",
    "Alamein Compound",
    "Substation 9",
];

/// Generate `count` snapshots, deterministic for a given `(count, seed, as_of)`.
pub fn generate_portfolio(
    count: usize,
    seed: u64,
    as_of: NaiveDate,
) -> Result<Vec<ProjectSnapshot>, AppError> {
    if count == 0 {
        return Err(AppError::input("Sample count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut snapshots = Vec::with_capacity(count);

    for i in 0..count {
        let id = format!("PRJ-{:03}", i + 1);
        let name = Some(format!("{} {}", SITE_NAMES[i % SITE_NAMES.len()], i / SITE_NAMES.len() + 1));

        // Schedule: started up to ~18 months ago, runs 2-24 months total.
        let started_days_ago = rng.gen_range(0..550);
        let total_days = rng.gen_range(60..730);
        let start = as_of - Days::new(started_days_ago);
        let end = start + Days::new(total_days);

        // Roughly every 12th row gets deliberately broken dates so reports
        // always show the malformed path.
        let (start_date, expected_end_date) = if i % 12 == 11 {
            (Some(end), Some(start))
        } else {
            (Some(start), Some(end))
        };

        let status_raw = Some(sample_status(&mut rng));
        let progress = sample_progress(&mut rng, started_days_ago, total_days);

        snapshots.push(ProjectSnapshot {
            id,
            name,
            status_raw,
            progress,
            start_date,
            expected_end_date,
        });
    }

    Ok(snapshots)
}

/// Pick a raw status, rotating through representations.
fn sample_status(rng: &mut StdRng) -> RawStatus {
    // Weighted toward active projects, like a real portfolio.
    let roll = rng.gen_range(0..100);
    match roll {
        0..=54 => pick_representation(rng, 1, "active", "قيد التنفيذ"),
        55..=69 => pick_representation(rng, 3, "pending", "معلق"),
        70..=84 => pick_representation(rng, 2, "completed", "مكتمل"),
        85..=93 => pick_representation(rng, 4, "delayed", "متأخر"),
        _ => pick_representation(rng, 5, "cancelled", "ملغي"),
    }
}

fn pick_representation(rng: &mut StdRng, code: i64, english: &str, arabic: &str) -> RawStatus {
    match rng.gen_range(0..3) {
        0 => RawStatus::Code(code),
        1 => RawStatus::Text(english.to_string()),
        _ => RawStatus::Text(arabic.to_string()),
    }
}

/// Reported progress: roughly tracks the schedule with noise, so the sample
/// yields a realistic spread of Good/Warning/Critical rows.
fn sample_progress(rng: &mut StdRng, started_days_ago: u64, total_days: u64) -> i64 {
    let on_schedule = (100 * started_days_ago.min(total_days)) / total_days.max(1);
    let noise = rng.gen_range(-35..=15);
    (on_schedule as i64 + noise).clamp(0, 100)
}
