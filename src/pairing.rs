//! Trip pairing
//!
//! Turns the alternating check-in/check-out rows of a transit log into trips.
//! The i-th check-in is paired with the i-th check-out by position; stations
//! and timestamps are not matched. Under the strict policy an unbalanced log is
//! rejected before any pairing happens. A trip that crosses midnight yields one
//! timeline event per date.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TimelineError;
use crate::types::{split_by_day, EventLabel, Interval, SourceKind, TransitKind, TransitRow};

/// Date-time pattern used to combine a trip date with a time of day
pub const TRIP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// How to treat a log whose check-in and check-out counts differ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingPolicy {
    /// Reject unbalanced logs with `PairingMismatch`
    #[default]
    Strict,
    /// Pair by position up to the shorter side and log a warning
    Lenient,
}

/// Check-in/check-out balance of a transit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingReport {
    pub check_ins: usize,
    pub check_outs: usize,
    /// Rows that are neither a check-in nor a check-out
    pub ignored: usize,
}

impl PairingReport {
    pub fn is_balanced(&self) -> bool {
        self.check_ins == self.check_outs
    }

    /// Number of trips positional pairing yields
    pub fn pairable(&self) -> usize {
        self.check_ins.min(self.check_outs)
    }
}

/// Count check-ins and check-outs without pairing them
pub fn validate_pairing(rows: &[TransitRow]) -> PairingReport {
    let mut report = PairingReport {
        check_ins: 0,
        check_outs: 0,
        ignored: 0,
    };
    for row in rows {
        match row.kind {
            TransitKind::CheckIn => report.check_ins += 1,
            TransitKind::CheckOut => report.check_outs += 1,
            TransitKind::Other(_) => report.ignored += 1,
        }
    }
    report
}

/// Pair check-ins with check-outs into trips
pub fn pair_trips(
    rows: &[TransitRow],
    policy: PairingPolicy,
) -> Result<Vec<Interval>, TimelineError> {
    let check_ins: Vec<&TransitRow> = rows
        .iter()
        .filter(|r| r.kind == TransitKind::CheckIn)
        .collect();
    let check_outs: Vec<&TransitRow> = rows
        .iter()
        .filter(|r| r.kind == TransitKind::CheckOut)
        .collect();

    if check_ins.len() != check_outs.len() {
        match policy {
            PairingPolicy::Strict => {
                return Err(TimelineError::PairingMismatch {
                    check_ins: check_ins.len(),
                    check_outs: check_outs.len(),
                });
            }
            PairingPolicy::Lenient => {
                warn!(
                    check_ins = check_ins.len(),
                    check_outs = check_outs.len(),
                    "unbalanced transit log, pairing by position"
                );
            }
        }
    }

    let trips = check_ins
        .iter()
        .zip(check_outs.iter())
        .enumerate()
        .map(|(index, (check_in, check_out))| build_trip(index, check_in, check_out))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(trips = trips.len(), "paired transit log");
    Ok(trips)
}

fn build_trip(
    index: usize,
    check_in: &TransitRow,
    check_out: &TransitRow,
) -> Result<Interval, TimelineError> {
    let beginning = trip_timestamp(check_in)?;
    let end = trip_timestamp(check_out)?;

    if beginning > end {
        return Err(TimelineError::InvertedInterval {
            index,
            beginning: beginning.to_string(),
            end: end.to_string(),
        });
    }

    // The check-out row carries both stations; the check-in's is a fallback
    let origin = if check_out.origin.is_empty() {
        check_in.origin.clone()
    } else {
        check_out.origin.clone()
    };
    let destination = check_out.destination.clone();
    let description = format!("{} - {}", origin, destination.as_deref().unwrap_or_default());

    let events = split_by_day(EventLabel::Transit, &description, beginning, end)?;
    if events.len() > 1 {
        debug!(index, days = events.len(), "trip crosses midnight");
    }

    Ok(Interval {
        origin,
        destination,
        beginning,
        end,
        events,
    })
}

fn trip_timestamp(row: &TransitRow) -> Result<NaiveDateTime, TimelineError> {
    let time = row.time.as_deref().ok_or_else(|| TimelineError::MissingField {
        kind: SourceKind::Transit,
        row: row.row,
        field: match row.kind {
            TransitKind::CheckOut => "Check-uit".to_string(),
            _ => "Check-in".to_string(),
        },
    })?;

    let stamp = format!("{} {}", row.date.format("%Y-%m-%d"), time);
    NaiveDateTime::parse_from_str(&stamp, TRIP_TIME_FORMAT).map_err(|_| {
        TimelineError::TimeParse {
            kind: SourceKind::Transit,
            row: row.row,
            value: time.to_string(),
        }
    })
}
