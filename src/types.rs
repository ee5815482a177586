//! Core types for the dayscope pipeline
//!
//! This module defines the records that flow through each stage: raw CSV rows,
//! normalized timeline events and mood samples, and the per-day buckets they
//! are grouped into.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::TimelineError;

/// One parsed CSV row: column name to cell value
pub type RawRow = HashMap<String, String>;

/// Data source identifier for provenance and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Transit,
    School,
    Sleep,
    Mood,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Transit,
        SourceKind::School,
        SourceKind::Sleep,
        SourceKind::Mood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Transit => "transit",
            SourceKind::School => "school",
            SourceKind::Sleep => "sleep",
            SourceKind::Mood => "mood",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category tag of a timeline event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLabel {
    Transit,
    School,
    Sleep,
}

impl EventLabel {
    /// Label shown on the dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            EventLabel::Transit => "openbaar vervoer",
            EventLabel::School => "School",
            EventLabel::Sleep => "Slaap",
        }
    }
}

impl fmt::Display for EventLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Records that belong to a single calendar date
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// A dated timeline record with a start and an end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub label: EventLabel,
    pub description: String,
    /// Calendar date the event is filed under
    pub date: NaiveDate,
    pub beginning: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Event {
    /// Build an event, checking that `beginning <= end` and that both lie
    /// within the 24 hours of `date` (midnight of the next day included).
    pub fn new(
        label: EventLabel,
        description: impl Into<String>,
        date: NaiveDate,
        beginning: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, TimelineError> {
        if beginning > end {
            return Err(TimelineError::InvalidEvent(format!(
                "{} on {}: begins at {} after it ends at {}",
                label, date, beginning, end
            )));
        }

        let (day_start, day_end) = day_span(date);
        if beginning < day_start || end > day_end {
            return Err(TimelineError::InvalidEvent(format!(
                "{} on {}: {} - {} falls outside the day",
                label, date, beginning, end
            )));
        }

        Ok(Self {
            label,
            description: description.into(),
            date,
            beginning,
            end,
        })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.beginning
    }
}

impl Dated for Event {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Start (00:00) and end (00:00 the next day) of a calendar date
pub fn day_span(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    (start, start + Duration::days(1))
}

/// Cut a span at every midnight it crosses, one event per calendar date.
///
/// A span ending exactly at midnight stays on its start date.
pub fn split_by_day(
    label: EventLabel,
    description: &str,
    beginning: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<Event>, TimelineError> {
    if beginning > end {
        return Err(TimelineError::InvalidEvent(format!(
            "{}: begins at {} after it ends at {}",
            label, beginning, end
        )));
    }

    let mut events = Vec::new();
    let mut start = beginning;
    loop {
        let date = start.date();
        let (_, midnight) = day_span(date);
        if end <= midnight {
            events.push(Event::new(label, description, date, start, end)?);
            return Ok(events);
        }
        events.push(Event::new(label, description, date, start, midnight)?);
        start = midnight;
    }
}

/// Kind of a transit log transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitKind {
    CheckIn,
    CheckOut,
    /// Top-ups, refunds and anything else the card log records
    Other(String),
}

impl TransitKind {
    pub fn from_transaction(value: &str) -> Self {
        match value.trim() {
            "Check-in" => TransitKind::CheckIn,
            "Check-uit" => TransitKind::CheckOut,
            other => TransitKind::Other(other.to_string()),
        }
    }
}

/// Normalized transit log row, before pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitRow {
    pub kind: TransitKind,
    /// Time of day (`HH:MM`), check-in time or check-out time
    pub time: Option<String>,
    pub date: NaiveDate,
    pub origin: String,
    pub destination: Option<String>,
    /// Position in the source file, for error reporting
    pub row: usize,
}

/// A completed transit trip: a check-in paired with a check-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub origin: String,
    pub destination: Option<String>,
    pub beginning: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Timeline events of the trip, one per date it touches
    pub events: Vec<Event>,
}

impl Interval {
    pub fn description(&self) -> &str {
        self.events
            .first()
            .map(|e| e.description.as_str())
            .unwrap_or_default()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Point-in-time arousal/valence observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSample {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Arousal on a 0-10 scale
    pub arousal: f64,
    /// Valence on a 0-10 scale
    pub valence: f64,
    pub description: String,
}

impl MoodSample {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

impl Dated for MoodSample {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// All records sharing one calendar date, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket<T> {
    pub date: NaiveDate,
    pub records: Vec<T>,
}

impl<T> DayBucket<T> {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            records: Vec::new(),
        }
    }

    /// Date key in `YYYY-MM-DD` form
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

/// Chronologically sorted day buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayIndex<T> {
    pub(crate) buckets: Vec<DayBucket<T>>,
}

impl<T> Default for DayIndex<T> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }
}

impl<T> DayIndex<T> {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, n: usize) -> Option<&DayBucket<T>> {
        self.buckets.get(n)
    }

    /// Bucket `n` positions into the index, wrapping around in both directions
    pub fn nth_wrapped(&self, n: i64) -> Option<&DayBucket<T>> {
        if self.buckets.is_empty() {
            return None;
        }
        let len = self.buckets.len() as i64;
        self.buckets.get(n.rem_euclid(len) as usize)
    }

    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket<T>> {
        self.buckets
            .binary_search_by(|b| b.date.cmp(&date))
            .ok()
            .map(|i| &self.buckets[i])
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.buckets.iter().map(|b| b.date).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayBucket<T>> {
        self.buckets.iter()
    }

    pub fn into_buckets(self) -> Vec<DayBucket<T>> {
        self.buckets
    }
}

/// One date present in both the timeline and the mood index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedDay<L = Event, R = MoodSample> {
    pub date: NaiveDate,
    pub timeline: DayBucket<L>,
    pub mood: DayBucket<R>,
}

/// Chronologically ordered dates with data on both sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedDayIndex<L = Event, R = MoodSample> {
    pub(crate) days: Vec<AlignedDay<L, R>>,
}

impl<L, R> Default for AlignedDayIndex<L, R> {
    fn default() -> Self {
        Self { days: Vec::new() }
    }
}

impl<L, R> AlignedDayIndex<L, R> {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, n: usize) -> Option<&AlignedDay<L, R>> {
        self.days.get(n)
    }

    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.days.binary_search_by(|d| d.date.cmp(&date)).ok()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlignedDay<L, R>> {
        self.days.iter()
    }
}
