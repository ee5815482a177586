//! Snapshot encoding
//!
//! Encodes aligned days into JSON payloads for an external renderer. Each
//! payload carries producer metadata so exports from different runs can be
//! told apart.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TimelineError;
use crate::navigator::DATE_LABEL_FORMAT;
use crate::timeline::{format_hm, DayView, InfoBox, MoodPoint, TimeScale};
use crate::types::{AlignedDay, AlignedDayIndex, Event, MoodSample};
use crate::{DAYSCOPE_VERSION, PRODUCER_NAME};

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Scrub selection: a time of day and what was active then
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSelection {
    /// `HH:MM`
    pub time: String,
    /// Slider position of `time`
    pub position: f64,
    pub activity: Option<InfoBox>,
    pub mood: Option<MoodSample>,
}

/// One aligned day, ready to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub producer: SnapshotProducer,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Display label of the date
    pub label: String,
    /// Category labels present on this day, sorted
    pub labels: Vec<String>,
    pub events: Vec<Event>,
    pub mood: Vec<MoodPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SnapshotSelection>,
}

/// Snapshot encoder
pub struct SnapshotEncoder {
    instance_id: String,
    scale: TimeScale,
}

impl Default for SnapshotEncoder {
    fn default() -> Self {
        Self::new(TimeScale::default())
    }
}

impl SnapshotEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new(scale: TimeScale) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            scale,
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String, scale: TimeScale) -> Self {
        Self { instance_id, scale }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Encode one day, with an optional scrub selection
    pub fn encode_day(&self, day: &AlignedDay, at: Option<NaiveTime>) -> DaySnapshot {
        let view = DayView::new(day);

        let selection = at.map(|time| SnapshotSelection {
            time: format_hm(&view.at(time)),
            position: self.scale.position_of(time),
            activity: view.info_box(time),
            mood: view.mood_at(time).cloned(),
        });

        let labels = crate::grouping::distinct_labels(view.events())
            .into_iter()
            .map(|l| l.display_name().to_string())
            .collect();

        DaySnapshot {
            producer: self.producer(),
            date: day.timeline.key(),
            label: day.date.format(DATE_LABEL_FORMAT).to_string(),
            labels,
            events: view.events().to_vec(),
            mood: view.mood_series(),
            selection,
        }
    }

    /// Encode every aligned day
    pub fn encode_index(&self, index: &AlignedDayIndex) -> Vec<DaySnapshot> {
        index.iter().map(|day| self.encode_day(day, None)).collect()
    }

    /// Encode one day to pretty JSON
    pub fn encode_day_to_json(
        &self,
        day: &AlignedDay,
        at: Option<NaiveTime>,
    ) -> Result<String, TimelineError> {
        let snapshot = self.encode_day(day, at);
        serde_json::to_string_pretty(&snapshot).map_err(TimelineError::Json)
    }

    fn producer(&self) -> SnapshotProducer {
        SnapshotProducer {
            name: PRODUCER_NAME.to_string(),
            version: DAYSCOPE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayBucket, EventLabel};
    use chrono::NaiveDate;

    fn sample_day() -> AlignedDay {
        let date = NaiveDate::from_ymd_opt(2018, 3, 5).unwrap();
        let hm = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();

        AlignedDay {
            date,
            timeline: DayBucket {
                date,
                records: vec![
                    Event::new(
                        EventLabel::School,
                        "Frontend development @ WBH 05A04",
                        date,
                        date.and_time(hm("09:00")),
                        date.and_time(hm("10:30")),
                    )
                    .unwrap(),
                    Event::new(
                        EventLabel::Transit,
                        "Utrecht Centraal - Amsterdam Centraal",
                        date,
                        date.and_time(hm("08:12")),
                        date.and_time(hm("08:41")),
                    )
                    .unwrap(),
                ],
            },
            mood: DayBucket {
                date,
                records: vec![MoodSample {
                    date,
                    time: hm("09:30"),
                    arousal: 7.0,
                    valence: 6.0,
                    description: "Koffie".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_encode_day_with_selection() {
        let encoder = SnapshotEncoder::with_instance_id("test-instance".to_string(), TimeScale::default());
        let snapshot = encoder.encode_day(
            &sample_day(),
            Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
        );

        assert_eq!(snapshot.producer.name, "dayscope");
        assert_eq!(snapshot.producer.instance_id, "test-instance");
        assert_eq!(snapshot.date, "2018-03-05");
        assert_eq!(snapshot.label, "Monday 5 March 2018");
        assert_eq!(snapshot.labels, vec!["School", "openbaar vervoer"]);
        assert_eq!(snapshot.events.len(), 2);

        let selection = snapshot.selection.unwrap();
        assert_eq!(selection.time, "10:00");
        assert_eq!(selection.activity.unwrap().time_range, "09:00 - 10:30");
        assert_eq!(selection.mood.unwrap().description, "Koffie");
    }

    #[test]
    fn test_json_payload() {
        let encoder = SnapshotEncoder::default();
        let json = encoder.encode_day_to_json(&sample_day(), None).unwrap();

        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(payload["date"], "2018-03-05");
        assert_eq!(payload["events"][0]["label"], "school");
        assert_eq!(payload["mood"][0]["arousal"], 7.0);
        assert!(payload.get("selection").is_none());
        assert_eq!(payload["producer"]["instance_id"], encoder.instance_id());
    }

    #[test]
    fn test_unique_instance_ids() {
        let a = SnapshotEncoder::default();
        let b = SnapshotEncoder::default();
        assert_ne!(a.instance_id(), b.instance_id());
    }
}
