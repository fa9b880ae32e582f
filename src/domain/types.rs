//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during evaluation
//! - exported to JSON/CSV
//! - reloaded later for comparisons across runs

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A project status exactly as it arrived from a data source.
///
/// Upstream systems disagree on representation: some send integer codes, some
/// English words, some Arabic words. Business logic never inspects this
/// directly; everything converts through `status::normalize` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawStatus {
    Code(i64),
    Text(String),
}

/// Canonical project lifecycle state, independent of source representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalStatus {
    Active,
    Completed,
    Pending,
    Delayed,
    Cancelled,
}

impl CanonicalStatus {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CanonicalStatus::Active => "active",
            CanonicalStatus::Completed => "completed",
            CanonicalStatus::Pending => "pending",
            CanonicalStatus::Delayed => "delayed",
            CanonicalStatus::Cancelled => "cancelled",
        }
    }
}

/// Three-level schedule-health indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLabel {
    Good,
    Warning,
    Critical,
}

impl HealthLabel {
    pub fn display_name(self) -> &'static str {
        match self {
            HealthLabel::Good => "good",
            HealthLabel::Warning => "WARNING",
            HealthLabel::Critical => "CRITICAL",
        }
    }
}

/// Normalizer output: a canonical status plus provenance.
///
/// `defaulted = true` means the raw value was missing or unmapped and the
/// documented Active fallback was applied; callers can distinguish that from
/// an input that explicitly said "active".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedStatus {
    pub status: CanonicalStatus,
    pub defaulted: bool,
}

/// One project as supplied by the caller. Immutable input to the pipeline.
///
/// Dates are `None` when the source value was absent or unparseable; the
/// schedule computer turns that into a flagged, fail-closed result rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub id: String,
    pub name: Option<String>,
    pub status_raw: Option<RawStatus>,
    /// Reported completion percentage. Clamped to [0, 100] before
    /// classification; stored here as received.
    pub progress: i64,
    pub start_date: Option<NaiveDate>,
    pub expected_end_date: Option<NaiveDate>,
}

/// Whole-day schedule arithmetic for one project, relative to an as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Days from start to expected end. 0 when input was malformed.
    pub total_days: i64,
    /// Days from start to as-of, clamped to [0, total_days].
    pub days_elapsed: i64,
    /// Signed days from as-of to expected end; negative means overdue.
    pub days_remaining: i64,
    /// Percentage of schedule consumed, assuming linear progress; [0, 100].
    pub expected_progress: i64,
    /// Set when the end date is not after the start date, or a date was
    /// absent/unparseable. Values above are the documented fail-closed ones.
    pub malformed: bool,
}

/// Full evaluation result for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: String,
    pub name: Option<String>,
    pub status: CanonicalStatus,
    /// True when the raw status was missing/unmapped and Active was assumed.
    pub status_defaulted: bool,
    /// Actual progress after clamping to [0, 100].
    pub progress: i64,
    pub timeline: Timeline,
    /// `progress - timeline.expected_progress`.
    pub progress_diff: i64,
    pub health: HealthLabel,
}

/// Where the portfolio comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioSource {
    /// JSON or CSV file (format picked by extension).
    File(PathBuf),
    /// Deterministic synthetic portfolio (`data::sample`).
    Sample { count: usize, seed: u64 },
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: PortfolioSource,
    /// Evaluation date. Injected so the pipeline never reads the clock.
    pub as_of: NaiveDate,
    /// How many most-behind projects to show in the laggards table.
    pub top_n: usize,
    pub export_results: Option<PathBuf>,
    pub export_report: Option<PathBuf>,
}
