//! Sleep log adapter
//!
//! A night that crosses midnight is split into two events: one from bedtime to
//! the end of the logged date and one from midnight to the last alarm on the
//! following date. Every event therefore stays inside its own day.

use chrono::{Duration, NaiveDateTime};

use crate::error::TimelineError;
use crate::types::{split_by_day, Event, EventLabel, RawRow, SourceKind};

use super::{parse_date, parse_time, require, SourceAdapter};

/// Sleep app export date format (`3/5/18`)
const DATE_FORMAT: &str = "%m/%d/%y";

const DESCRIPTION: &str = "Slaap";

/// Sleep log adapter
pub struct SleepAdapter;

impl SourceAdapter for SleepAdapter {
    type Record = Event;

    fn kind(&self) -> SourceKind {
        SourceKind::Sleep
    }

    fn normalize(&self, rows: &[RawRow]) -> Result<Vec<Event>, TimelineError> {
        let mut events = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            events.extend(normalize_row(row, index)?);
        }
        Ok(events)
    }
}

fn normalize_row(row: &RawRow, index: usize) -> Result<Vec<Event>, TimelineError> {
    let kind = SourceKind::Sleep;
    let date = parse_date(require(row, kind, index, "Slaap")?, DATE_FORMAT, kind, index)?;
    let start = parse_time(require(row, kind, index, "Start Slaap Tijd")?, "%H:%M", kind, index)?;
    let wake = parse_time(
        require(row, kind, index, "Laatste Wekker Tijd")?,
        "%H:%M",
        kind,
        index,
    )?;

    let bedtime = NaiveDateTime::new(date, start);
    let alarm = if start <= wake {
        NaiveDateTime::new(date, wake)
    } else {
        NaiveDateTime::new(date + Duration::days(1), wake)
    };

    split_by_day(EventLabel::Sleep, DESCRIPTION, bedtime, alarm)
}
