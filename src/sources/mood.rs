//! Mood log adapter

use crate::error::TimelineError;
use crate::types::{MoodSample, RawRow, SourceKind};

use super::{field, parse_date, parse_number, parse_time, require, SourceAdapter};

/// Mood log adapter
pub struct MoodAdapter;

impl SourceAdapter for MoodAdapter {
    type Record = MoodSample;

    fn kind(&self) -> SourceKind {
        SourceKind::Mood
    }

    fn normalize(&self, rows: &[RawRow]) -> Result<Vec<MoodSample>, TimelineError> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| normalize_row(row, index))
            .collect()
    }
}

fn normalize_row(row: &RawRow, index: usize) -> Result<MoodSample, TimelineError> {
    let kind = SourceKind::Mood;
    let date = parse_date(require(row, kind, index, "Emotie")?, "%m/%d/%y", kind, index)?;

    // `Tijd` is HHmm; spreadsheets drop the leading zero of morning hours
    let raw_time = require(row, kind, index, "Tijd")?;
    let time = parse_time(&format!("{:0>4}", raw_time), "%H%M", kind, index)?;

    Ok(MoodSample {
        date,
        time,
        arousal: parse_number(row, kind, index, "Arousal")?,
        valence: parse_number(row, kind, index, "Valance")?,
        description: field(row, "Wat").unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::row;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_normalize_mood_row() {
        let rows = vec![row(&[
            ("Emotie", "3/5/18"),
            ("Tijd", "0930"),
            ("Arousal", "7"),
            ("Valance", "6"),
            ("Wat", "Koffie"),
        ])];

        let samples = MoodAdapter.normalize(&rows).unwrap();
        let sample = &samples[0];
        assert_eq!(sample.date, NaiveDate::from_ymd_opt(2018, 3, 5).unwrap());
        assert_eq!(sample.time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(sample.arousal, 7.0);
        assert_eq!(sample.valence, 6.0);
        assert_eq!(sample.description, "Koffie");
    }

    #[test]
    fn test_short_time_is_padded() {
        let rows = vec![row(&[
            ("Emotie", "3/5/18"),
            ("Tijd", "745"),
            ("Arousal", "3"),
            ("Valance", "4"),
        ])];

        let samples = MoodAdapter.normalize(&rows).unwrap();
        assert_eq!(samples[0].time, NaiveTime::from_hms_opt(7, 45, 0).unwrap());
        assert_eq!(samples[0].description, "");
    }

    #[test]
    fn test_malformed_time() {
        let rows = vec![row(&[
            ("Emotie", "3/5/18"),
            ("Tijd", "2575"),
            ("Arousal", "3"),
            ("Valance", "4"),
        ])];

        assert!(matches!(
            MoodAdapter.normalize(&rows),
            Err(TimelineError::TimeParse { kind: SourceKind::Mood, .. })
        ));
    }
}
