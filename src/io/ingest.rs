//! Portfolio ingest and normalization.
//!
//! Turns a heterogeneous project list (JSON array or CSV) into clean
//! `ProjectSnapshot`s that are safe to evaluate.
//!
//! Design goals:
//! - **Row-level validation**: a bad row is skipped and reported, never fatal
//! - **Lenient field shapes**: ids and statuses may be numbers or strings,
//!   dates may be plain dates or ISO-8601 datetimes
//! - **Deterministic behavior**: rows come out in input order
//!
//! A file only fails as a whole when it cannot be read or is not a list
//! (exit code 2), or when zero usable rows remain (exit code 3).

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use serde_json::Value;

use crate::domain::{ProjectSnapshot, RawStatus};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based row number (JSON: array index + 1; CSV: file line).
    pub row: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: normalized snapshots + row errors + counters.
#[derive(Debug, Clone)]
pub struct IngestedPortfolio {
    pub snapshots: Vec<ProjectSnapshot>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl IngestedPortfolio {
    /// Wrap already-built snapshots (e.g. the synthetic sample) so they flow
    /// through the same pipeline as file input.
    pub fn from_snapshots(snapshots: Vec<ProjectSnapshot>) -> Self {
        let rows = snapshots.len();
        Self {
            snapshots,
            row_errors: Vec::new(),
            rows_read: rows,
            rows_used: rows,
        }
    }
}

/// Load a portfolio file, picking the format from the extension.
///
/// `.csv` is parsed as CSV; everything else (including no extension) as JSON.
pub fn load_portfolio(path: &Path) -> Result<IngestedPortfolio, AppError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let portfolio = if is_csv {
        load_csv(path)?
    } else {
        load_json(path)?
    };

    if portfolio.rows_used == 0 {
        return Err(AppError::empty(format!(
            "No usable projects in '{}' ({} rows rejected).",
            path.display(),
            portfolio.row_errors.len()
        )));
    }

    Ok(portfolio)
}

/// Parse a date leniently: `YYYY-MM-DD`, else the date part of an ISO-8601
/// datetime. Anything else is `None` — the schedule computer flags it as
/// malformed instead of ingest rejecting the row.
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // "2024-01-05T00:00:00Z" and friends: try the first 10 characters.
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn load_json(path: &Path) -> Result<IngestedPortfolio, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open '{}': {e}", path.display())))?;

    let root: Value = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid JSON in '{}': {e}", path.display())))?;

    let Value::Array(items) = root else {
        return Err(AppError::input(format!(
            "Expected a top-level JSON array of projects in '{}'.",
            path.display()
        )));
    };

    let mut snapshots = Vec::with_capacity(items.len());
    let mut row_errors = Vec::new();
    let rows_read = items.len();

    for (idx, item) in items.iter().enumerate() {
        let row = idx + 1;
        match snapshot_from_json(item) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(message) => row_errors.push(RowError {
                row,
                id: json_field_string(item, "id"),
                message,
            }),
        }
    }

    let rows_used = snapshots.len();
    Ok(IngestedPortfolio {
        snapshots,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn snapshot_from_json(item: &Value) -> Result<ProjectSnapshot, String> {
    let obj = item.as_object().ok_or("Not a JSON object.")?;

    let id = json_field_string(item, "id").ok_or("Missing or non-scalar 'id'.")?;

    let name = obj.get("name").and_then(Value::as_str).map(str::to_string);

    let status_raw = match obj.get("status") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(code) => Some(RawStatus::Code(code)),
            None => return Err(format!("Non-integer status code: {n}")),
        },
        Some(Value::String(s)) => Some(RawStatus::Text(s.clone())),
        Some(other) => return Err(format!("Unsupported status shape: {other}")),
    };

    let progress = match obj.get("progress") {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|v| v.round() as i64)
            .ok_or_else(|| format!("Unreadable progress: {n}"))?,
        Some(other) => return Err(format!("Unsupported progress shape: {other}")),
    };

    let start_date = json_date(obj.get("start_date"));
    // Two upstream spellings for the same field.
    let expected_end_date = json_date(obj.get("expected_end_date").or_else(|| obj.get("end_date")));

    Ok(ProjectSnapshot {
        id,
        name,
        status_raw,
        progress,
        start_date,
        expected_end_date,
    })
}

/// Read a field that may be a string or a number, as a string.
fn json_field_string(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_date(value: Option<&Value>) -> Option<NaiveDate> {
    parse_date_lenient(value?.as_str()?)
}

fn load_csv(path: &Path) -> Result<IngestedPortfolio, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let id_col = *header_map
        .iter()
        .find(|(name, _)| *name == "id")
        .map(|(_, idx)| idx)
        .ok_or_else(|| AppError::input("CSV is missing the required 'id' column."))?;

    let mut snapshots = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, CSV lines are 1-based.
        let row = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    row,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match snapshot_from_record(&record, &header_map, id_col) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(message) => row_errors.push(RowError {
                row,
                id: record.get(id_col).map(str::to_string),
                message,
            }),
        }
    }

    let rows_used = snapshots.len();
    Ok(IngestedPortfolio {
        snapshots,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Lowercased header name -> column index, aliases folded in.
fn build_header_map(headers: &StringRecord) -> Vec<(String, usize)> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.trim().to_lowercase();
            let name = match name.as_str() {
                "project_id" => "id".to_string(),
                "project_name" => "name".to_string(),
                "expected_end_date" | "expected_end" => "end_date".to_string(),
                _ => name,
            };
            (name, idx)
        })
        .collect()
}

fn column<'r>(record: &'r StringRecord, map: &[(String, usize)], name: &str) -> Option<&'r str> {
    let idx = map.iter().find(|(n, _)| n == name).map(|(_, idx)| *idx)?;
    record.get(idx).filter(|v| !v.is_empty())
}

fn snapshot_from_record(
    record: &StringRecord,
    map: &[(String, usize)],
    id_col: usize,
) -> Result<ProjectSnapshot, String> {
    let id = record
        .get(id_col)
        .filter(|v| !v.is_empty())
        .ok_or("Missing 'id' value.")?
        .to_string();

    let name = column(record, map, "name").map(str::to_string);

    // In CSV everything is text; the normalizer sorts codes from words.
    let status_raw = column(record, map, "status").map(|s| RawStatus::Text(s.to_string()));

    let progress = match column(record, map, "progress") {
        None => 0,
        Some(raw) => raw
            .parse::<f64>()
            .map(|v| v.round() as i64)
            .map_err(|_| format!("Unreadable progress: '{raw}'"))?,
    };

    let start_date = column(record, map, "start_date").and_then(parse_date_lenient);
    let expected_end_date = column(record, map, "end_date").and_then(parse_date_lenient);

    Ok(ProjectSnapshot {
        id,
        name,
        status_raw,
        progress,
        start_date,
        expected_end_date,
    })
}
