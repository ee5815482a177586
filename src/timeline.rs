//! Day view and time scrubbing
//!
//! Answers the questions the dashboard asks while the time slider moves:
//! which slider position maps to which time of day, which timeline event is
//! active at that time, and which mood was last reported.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::{day_span, AlignedDay, Event, EventLabel, MoodSample};

/// Default slider width in pixels
pub const DEFAULT_SLIDER_WIDTH: u32 = 1400;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Format a timestamp as `HH:MM`
pub fn format_hm(stamp: &NaiveDateTime) -> String {
    stamp.format("%H:%M").to_string()
}

/// Linear mapping between slider positions and the 24 hours of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeScale {
    pub width: u32,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new(DEFAULT_SLIDER_WIDTH)
    }
}

impl TimeScale {
    pub fn new(width: u32) -> Self {
        Self {
            width: width.max(1),
        }
    }

    /// Time of day at a slider position; positions outside the slider are clamped
    pub fn time_at(&self, position: f64) -> NaiveTime {
        let clamped = position.clamp(0.0, self.width as f64);
        let seconds = (clamped / self.width as f64 * SECONDS_PER_DAY as f64).round() as i64;
        // The right edge is midnight of the next day; show it as the last second
        let seconds = seconds.min(SECONDS_PER_DAY - 1);
        NaiveTime::MIN + Duration::seconds(seconds)
    }

    /// Slider position of a time of day
    pub fn position_of(&self, time: NaiveTime) -> f64 {
        time.num_seconds_from_midnight() as f64 / SECONDS_PER_DAY as f64 * self.width as f64
    }
}

/// Text shown next to the time cursor for the active event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoBox {
    pub label: String,
    pub description: String,
    /// `HH:MM - HH:MM`
    pub time_range: String,
}

impl InfoBox {
    pub fn for_event(event: &Event) -> Self {
        Self {
            label: event.label.display_name().to_string(),
            description: event.description.clone(),
            time_range: format!("{} - {}", format_hm(&event.beginning), format_hm(&event.end)),
        }
    }
}

/// One point of the mood line chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub time: NaiveTime,
    pub arousal: f64,
    pub valence: f64,
}

/// Read-only view of one aligned day
#[derive(Debug, Clone, Copy)]
pub struct DayView<'a> {
    day: &'a AlignedDay,
}

impl<'a> DayView<'a> {
    pub fn new(day: &'a AlignedDay) -> Self {
        Self { day }
    }

    pub fn day(&self) -> &'a AlignedDay {
        self.day
    }

    pub fn events(&self) -> &'a [Event] {
        &self.day.timeline.records
    }

    pub fn mood_samples(&self) -> &'a [MoodSample] {
        &self.day.mood.records
    }

    /// Timestamp on this day for a time of day
    pub fn at(&self, time: NaiveTime) -> NaiveDateTime {
        self.day.date.and_time(time)
    }

    /// First event strictly containing `time`; touching an edge does not count
    pub fn active_event_at(&self, time: NaiveTime) -> Option<&'a Event> {
        let stamp = self.at(time);
        self.events()
            .iter()
            .find(|e| e.beginning < stamp && stamp < e.end)
    }

    /// Latest mood sample reported at or before `time`
    pub fn mood_at(&self, time: NaiveTime) -> Option<&'a MoodSample> {
        self.mood_samples()
            .iter()
            .filter(|s| s.time <= time)
            .max_by_key(|s| s.time)
    }

    pub fn info_box(&self, time: NaiveTime) -> Option<InfoBox> {
        self.active_event_at(time).map(InfoBox::for_event)
    }

    /// Mood samples as line chart points, ordered by time
    pub fn mood_series(&self) -> Vec<MoodPoint> {
        let mut points: Vec<MoodPoint> = self
            .mood_samples()
            .iter()
            .map(|s| MoodPoint {
                time: s.time,
                arousal: s.arousal,
                valence: s.valence,
            })
            .collect();
        points.sort_by_key(|p| p.time);
        points
    }

    /// Share of the day each label occupies, clipped to the day
    pub fn coverage(&self) -> Vec<(EventLabel, Duration)> {
        let (start, end) = day_span(self.day.date);
        let mut totals: Vec<(EventLabel, Duration)> = Vec::new();
        for event in self.events() {
            let span = event.end.min(end) - event.beginning.max(start);
            match totals.iter_mut().find(|(label, _)| *label == event.label) {
                Some((_, total)) => *total += span,
                None => totals.push((event.label, span)),
            }
        }
        totals.sort_by_key(|(label, _)| *label);
        totals
    }
}
