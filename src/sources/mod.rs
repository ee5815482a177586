//! Source adapters
//!
//! This module provides adapters that map raw CSV rows from each personal log
//! to normalized, typed records. Row numbers in errors are 1-based data rows
//! (the header is not counted).

mod mood;
mod school;
mod sleep;
mod transit;

pub use mood::MoodAdapter;
pub use school::SchoolAdapter;
pub use sleep::SleepAdapter;
pub use transit::TransitAdapter;

use chrono::{NaiveDate, NaiveTime};

use crate::error::TimelineError;
use crate::types::{RawRow, SourceKind};

/// Trait for per-source row adapters
pub trait SourceAdapter {
    /// Normalized record produced by this adapter
    type Record;

    /// Source this adapter reads
    fn kind(&self) -> SourceKind;

    /// Map raw rows to records, failing on the first malformed row
    fn normalize(&self, rows: &[RawRow]) -> Result<Vec<Self::Record>, TimelineError>;
}

/// Non-empty, trimmed cell value
pub(crate) fn field<'a>(row: &'a RawRow, name: &str) -> Option<&'a str> {
    row.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

pub(crate) fn require<'a>(
    row: &'a RawRow,
    kind: SourceKind,
    index: usize,
    name: &str,
) -> Result<&'a str, TimelineError> {
    field(row, name).ok_or_else(|| TimelineError::MissingField {
        kind,
        row: index + 1,
        field: name.to_string(),
    })
}

pub(crate) fn parse_date(
    value: &str,
    format: &str,
    kind: SourceKind,
    index: usize,
) -> Result<NaiveDate, TimelineError> {
    NaiveDate::parse_from_str(value, format).map_err(|_| TimelineError::DateParse {
        kind,
        row: index + 1,
        value: value.to_string(),
    })
}

pub(crate) fn parse_time(
    value: &str,
    format: &str,
    kind: SourceKind,
    index: usize,
) -> Result<NaiveTime, TimelineError> {
    NaiveTime::parse_from_str(value, format).map_err(|_| TimelineError::TimeParse {
        kind,
        row: index + 1,
        value: value.to_string(),
    })
}

pub(crate) fn parse_number(
    row: &RawRow,
    kind: SourceKind,
    index: usize,
    name: &str,
) -> Result<f64, TimelineError> {
    let value = require(row, kind, index, name)?;
    // Spreadsheet exports may use a decimal comma
    value
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| TimelineError::NumberParse {
            kind,
            row: index + 1,
            field: name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
pub(crate) fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
