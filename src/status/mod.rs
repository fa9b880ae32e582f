//! Status normalization.
//!
//! Upstream data sources represent project status three different ways:
//! integer codes, English words, and Arabic words — and historically two
//! call sites used *different* integer numbering. This module is the single
//! place where all of those collapse into `CanonicalStatus`, so raw codes
//! never leak into business logic.
//!
//! Contract:
//! - never panics, never returns an error
//! - unknown/missing input falls back to `Active` with `defaulted = true`
//! - normalizing an already-canonical name is a no-op (idempotent)

use crate::domain::{CanonicalStatus, NormalizedStatus, RawStatus};

/// The one canonical numeric table.
///
/// Reconciles the legacy 1-based scheme (1=active, 2=completed, 3=pending,
/// 4=delayed) and extends it with 5=cancelled; the conflicting 0-based scheme
/// some exports used is intentionally not recognized, so its codes surface as
/// `defaulted` rows in reports instead of being silently misread.
fn from_code(code: i64) -> Option<CanonicalStatus> {
    match code {
        1 => Some(CanonicalStatus::Active),
        2 => Some(CanonicalStatus::Completed),
        3 => Some(CanonicalStatus::Pending),
        4 => Some(CanonicalStatus::Delayed),
        5 => Some(CanonicalStatus::Cancelled),
        _ => None,
    }
}

/// English vocabulary. Input is already trimmed and lowercased.
fn from_english(text: &str) -> Option<CanonicalStatus> {
    match text {
        "active" | "in progress" => Some(CanonicalStatus::Active),
        "completed" | "done" | "finished" => Some(CanonicalStatus::Completed),
        "pending" | "on hold" => Some(CanonicalStatus::Pending),
        "delayed" | "behind schedule" => Some(CanonicalStatus::Delayed),
        "cancelled" | "canceled" => Some(CanonicalStatus::Cancelled),
        _ => None,
    }
}

/// Arabic vocabulary. Input is already trimmed (case does not apply).
fn from_arabic(text: &str) -> Option<CanonicalStatus> {
    match text {
        "قيد التنفيذ" => Some(CanonicalStatus::Active),
        "مكتمل" | "تم الانتهاء" => Some(CanonicalStatus::Completed),
        "معلق" => Some(CanonicalStatus::Pending),
        "متأخر" => Some(CanonicalStatus::Delayed),
        "ملغي" => Some(CanonicalStatus::Cancelled),
        _ => None,
    }
}

/// Map a raw status of unknown shape to a canonical one.
///
/// Text goes through trim + lowercase, then the English table, then the
/// Arabic table, then a numeric-string fallback ("2" behaves like 2).
pub fn normalize(raw: Option<&RawStatus>) -> NormalizedStatus {
    let mapped = match raw {
        None => None,
        Some(RawStatus::Code(code)) => from_code(*code),
        Some(RawStatus::Text(text)) => {
            let cleaned = text.trim().to_lowercase();
            from_english(&cleaned)
                .or_else(|| from_arabic(cleaned.as_str()))
                .or_else(|| cleaned.parse::<i64>().ok().and_then(from_code))
        }
    };

    match mapped {
        Some(status) => NormalizedStatus {
            status,
            defaulted: false,
        },
        None => NormalizedStatus {
            status: CanonicalStatus::Active,
            defaulted: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawStatus {
        RawStatus::Text(s.to_string())
    }

    #[test]
    fn numeric_codes_use_canonical_table() {
        let cases = [
            (1, CanonicalStatus::Active),
            (2, CanonicalStatus::Completed),
            (3, CanonicalStatus::Pending),
            (4, CanonicalStatus::Delayed),
            (5, CanonicalStatus::Cancelled),
        ];
        for (code, expected) in cases {
            let n = normalize(Some(&RawStatus::Code(code)));
            assert_eq!(n.status, expected, "code {code}");
            assert!(!n.defaulted);
        }
    }

    #[test]
    fn unknown_code_defaults_to_active_with_flag() {
        let n = normalize(Some(&RawStatus::Code(0)));
        assert_eq!(n.status, CanonicalStatus::Active);
        assert!(n.defaulted);

        let n = normalize(Some(&RawStatus::Code(99)));
        assert_eq!(n.status, CanonicalStatus::Active);
        assert!(n.defaulted);
    }

    #[test]
    fn missing_status_defaults_to_active_with_flag() {
        let n = normalize(None);
        assert_eq!(n.status, CanonicalStatus::Active);
        assert!(n.defaulted);
    }

    #[test]
    fn english_matching_is_case_insensitive_and_trimmed() {
        let n = normalize(Some(&text("  Completed ")));
        assert_eq!(n.status, CanonicalStatus::Completed);
        assert!(!n.defaulted);

        let n = normalize(Some(&text("IN PROGRESS")));
        assert_eq!(n.status, CanonicalStatus::Active);
        assert!(!n.defaulted);
    }

    #[test]
    fn arabic_vocabulary_maps() {
        let cases = [
            ("قيد التنفيذ", CanonicalStatus::Active),
            ("معلق", CanonicalStatus::Pending),
            ("مكتمل", CanonicalStatus::Completed),
            ("تم الانتهاء", CanonicalStatus::Completed),
            ("ملغي", CanonicalStatus::Cancelled),
            ("متأخر", CanonicalStatus::Delayed),
        ];
        for (raw, expected) in cases {
            let n = normalize(Some(&text(raw)));
            assert_eq!(n.status, expected, "input {raw:?}");
            assert!(!n.defaulted);
        }
    }

    #[test]
    fn arabic_input_with_whitespace_is_trimmed() {
        let n = normalize(Some(&text("  معلق\n")));
        assert_eq!(n.status, CanonicalStatus::Pending);
        assert!(!n.defaulted);
    }

    #[test]
    fn numeric_strings_behave_like_codes() {
        let n = normalize(Some(&text("4")));
        assert_eq!(n.status, CanonicalStatus::Delayed);
        assert!(!n.defaulted);
    }

    #[test]
    fn canonical_names_round_trip_unchanged() {
        for status in [
            CanonicalStatus::Active,
            CanonicalStatus::Completed,
            CanonicalStatus::Pending,
            CanonicalStatus::Delayed,
            CanonicalStatus::Cancelled,
        ] {
            let n = normalize(Some(&text(status.display_name())));
            assert_eq!(n.status, status);
            assert!(!n.defaulted, "{status:?} should not count as defaulted");
        }
    }

    #[test]
    fn gibberish_defaults_with_flag() {
        let n = normalize(Some(&text("???")));
        assert_eq!(n.status, CanonicalStatus::Active);
        assert!(n.defaulted);
    }
}
