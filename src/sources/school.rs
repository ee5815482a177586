//! School schedule adapter

use chrono::NaiveDateTime;

use crate::error::TimelineError;
use crate::types::{Event, EventLabel, RawRow, SourceKind};

use super::{parse_date, parse_time, require, SourceAdapter};

/// School schedule adapter
pub struct SchoolAdapter;

impl SourceAdapter for SchoolAdapter {
    type Record = Event;

    fn kind(&self) -> SourceKind {
        SourceKind::School
    }

    fn normalize(&self, rows: &[RawRow]) -> Result<Vec<Event>, TimelineError> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| normalize_row(row, index))
            .collect()
    }
}

fn normalize_row(row: &RawRow, index: usize) -> Result<Event, TimelineError> {
    let kind = SourceKind::School;
    let date = parse_date(require(row, kind, index, "Start date")?, "%Y-%m-%d", kind, index)?;
    let start = parse_time(require(row, kind, index, "Start time")?, "%H:%M", kind, index)?;
    let end = parse_time(require(row, kind, index, "End time")?, "%H:%M", kind, index)?;

    let activity = require(row, kind, index, "Activity")?;
    let location = require(row, kind, index, "Location")?;

    Event::new(
        EventLabel::School,
        format!("{} @ {}", activity, location),
        date,
        NaiveDateTime::new(date, start),
        NaiveDateTime::new(date, end),
    )
}
