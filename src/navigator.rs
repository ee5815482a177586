//! Day navigation
//!
//! `Navigator` owns the aligned day index and a cursor into it. Stepping past
//! either end wraps around. All queries on an empty index return
//! `TimelineError::NoData`.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::TimelineError;
use crate::types::{AlignedDay, AlignedDayIndex, DayBucket};

/// Display format of the selected date (`Monday 5 March 2018`)
pub const DATE_LABEL_FORMAT: &str = "%A %-d %B %Y";

/// Cursor over an aligned day index
#[derive(Debug, Clone)]
pub struct Navigator<L = crate::types::Event, R = crate::types::MoodSample> {
    index: AlignedDayIndex<L, R>,
    cursor: usize,
}

impl<L, R> Navigator<L, R> {
    /// Create a navigator positioned at `start`, wrapped to the index length
    pub fn new(index: AlignedDayIndex<L, R>, start: usize) -> Self {
        let cursor = if index.is_empty() {
            0
        } else {
            start % index.len()
        };
        Self { index, cursor }
    }

    pub fn index(&self) -> &AlignedDayIndex<L, R> {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Current cursor position
    pub fn cursor(&self) -> Result<usize, TimelineError> {
        self.ensure_data()?;
        Ok(self.cursor)
    }

    /// Day at the cursor
    pub fn current(&self) -> Result<&AlignedDay<L, R>, TimelineError> {
        self.index.get(self.cursor).ok_or(TimelineError::NoData)
    }

    /// Timeline and mood buckets at the cursor
    pub fn current_buckets(&self) -> Result<(&DayBucket<L>, &DayBucket<R>), TimelineError> {
        let day = self.current()?;
        Ok((&day.timeline, &day.mood))
    }

    /// Step one day forward, wrapping to the first day
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&AlignedDay<L, R>, TimelineError> {
        self.step(1)
    }

    /// Step one day back, wrapping to the last day
    pub fn previous(&mut self) -> Result<&AlignedDay<L, R>, TimelineError> {
        self.step(-1)
    }

    /// Move the cursor by `offset` days, wrapping in both directions
    pub fn step(&mut self, offset: i64) -> Result<&AlignedDay<L, R>, TimelineError> {
        self.ensure_data()?;
        let len = self.index.len() as i64;
        let offset = offset.rem_euclid(len);
        self.cursor = (self.cursor as i64 + offset).rem_euclid(len) as usize;
        debug!(cursor = self.cursor, "moved day cursor");
        self.current()
    }

    /// Move to the given date if it has aligned data
    pub fn jump_to(&mut self, date: NaiveDate) -> Result<Option<&AlignedDay<L, R>>, TimelineError> {
        self.ensure_data()?;
        match self.index.position(date) {
            Some(position) => {
                self.cursor = position;
                self.current().map(Some)
            }
            None => Ok(None),
        }
    }

    /// Human-readable label of the current date
    pub fn date_label(&self) -> Result<String, TimelineError> {
        let day = self.current()?;
        Ok(day.date.format(DATE_LABEL_FORMAT).to_string())
    }

    fn ensure_data(&self) -> Result<(), TimelineError> {
        if self.index.is_empty() {
            Err(TimelineError::NoData)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::align;
    use crate::grouping::group_by_day;
    use crate::types::{Event, EventLabel, MoodSample};
    use chrono::NaiveTime;

    fn aligned(dates: &[&str]) -> AlignedDayIndex {
        let dates: Vec<NaiveDate> = dates
            .iter()
            .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap())
            .collect();

        let events = group_by_day(dates.iter().map(|&d| {
            let (start, _) = crate::types::day_span(d);
            Event::new(EventLabel::School, "Les", d, start, start).unwrap()
        }));
        let moods = group_by_day(dates.iter().map(|&d| MoodSample {
            date: d,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            arousal: 5.0,
            valence: 5.0,
            description: String::new(),
        }));

        align(events, moods)
    }

    fn five_days() -> AlignedDayIndex {
        aligned(&[
            "2018-03-05",
            "2018-03-06",
            "2018-03-07",
            "2018-03-08",
            "2018-03-09",
        ])
    }

    #[test]
    fn test_next_wraps_to_first_day() {
        let mut navigator = Navigator::new(five_days(), 4);
        assert_eq!(navigator.cursor().unwrap(), 4);

        let day = navigator.next().unwrap();
        assert_eq!(day.timeline.key(), "2018-03-05");
        assert_eq!(navigator.cursor().unwrap(), 0);
    }

    #[test]
    fn test_previous_wraps_to_last_day() {
        let mut navigator = Navigator::new(five_days(), 0);
        navigator.previous().unwrap();
        assert_eq!(navigator.cursor().unwrap(), 4);
        navigator.previous().unwrap();
        assert_eq!(navigator.cursor().unwrap(), 3);
    }

    #[test]
    fn test_step_with_extreme_offsets() {
        let mut navigator = Navigator::new(five_days(), 3);
        // i64::MAX % 5 == 2
        navigator.step(i64::MAX).unwrap();
        assert_eq!(navigator.cursor().unwrap(), 0);
        // i64::MIN.rem_euclid(5) == 2
        navigator.step(i64::MIN).unwrap();
        assert_eq!(navigator.cursor().unwrap(), 2);
    }

    #[test]
    fn test_start_is_wrapped() {
        let navigator = Navigator::new(five_days(), 11);
        assert_eq!(navigator.cursor().unwrap(), 1);
    }

    #[test]
    fn test_empty_index_reports_no_data() {
        let mut navigator: Navigator = Navigator::new(AlignedDayIndex::default(), 11);
        assert!(navigator.is_empty());
        assert!(matches!(navigator.current(), Err(TimelineError::NoData)));
        assert!(matches!(navigator.next(), Err(TimelineError::NoData)));
        assert!(matches!(navigator.previous(), Err(TimelineError::NoData)));
        assert!(matches!(navigator.date_label(), Err(TimelineError::NoData)));
        assert!(matches!(navigator.cursor(), Err(TimelineError::NoData)));
    }

    #[test]
    fn test_current_pairs_buckets() {
        let navigator = Navigator::new(five_days(), 2);
        let (timeline, mood) = navigator.current_buckets().unwrap();
        assert_eq!(timeline.date, mood.date);
        assert_eq!(timeline.key(), "2018-03-07");
    }

    #[test]
    fn test_jump_to() {
        let mut navigator = Navigator::new(five_days(), 0);
        let target = NaiveDate::from_ymd_opt(2018, 3, 8).unwrap();
        assert!(navigator.jump_to(target).unwrap().is_some());
        assert_eq!(navigator.cursor().unwrap(), 3);

        let missing = NaiveDate::from_ymd_opt(2018, 4, 1).unwrap();
        assert!(navigator.jump_to(missing).unwrap().is_none());
        assert_eq!(navigator.cursor().unwrap(), 3);
    }

    #[test]
    fn test_date_label() {
        let navigator = Navigator::new(five_days(), 0);
        assert_eq!(navigator.date_label().unwrap(), "Monday 5 March 2018");
    }
}
