//! Day alignment
//!
//! Intersects two day indexes on their dates. The result keeps the left
//! index's chronological order and moves both buckets of every shared date
//! into one `AlignedDay`.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::types::{AlignedDay, AlignedDayIndex, DayBucket, DayIndex};

/// Keep the dates present in both indexes
pub fn align<L, R>(left: DayIndex<L>, right: DayIndex<R>) -> AlignedDayIndex<L, R> {
    let left_days = left.len();
    let right_days = right.len();

    let mut by_date: HashMap<NaiveDate, DayBucket<R>> = right
        .into_buckets()
        .into_iter()
        .map(|bucket| (bucket.date, bucket))
        .collect();

    let days: Vec<AlignedDay<L, R>> = left
        .into_buckets()
        .into_iter()
        .filter_map(|timeline| {
            by_date.remove(&timeline.date).map(|mood| AlignedDay {
                date: timeline.date,
                timeline,
                mood,
            })
        })
        .collect();

    debug!(
        left = left_days,
        right = right_days,
        aligned = days.len(),
        "aligned day indexes"
    );

    AlignedDayIndex { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_by_day;
    use crate::types::{Event, EventLabel, MoodSample};
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn events(dates: &[&str]) -> DayIndex<Event> {
        group_by_day(dates.iter().map(|d| {
            let (start, _) = crate::types::day_span(date(d));
            Event::new(EventLabel::School, "Les", date(d), start, start).unwrap()
        }))
    }

    fn moods(dates: &[&str]) -> DayIndex<MoodSample> {
        group_by_day(dates.iter().map(|d| MoodSample {
            date: date(d),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            arousal: 4.0,
            valence: 6.0,
            description: String::new(),
        }))
    }

    #[test]
    fn test_keeps_shared_dates_in_left_order() {
        let aligned = align(
            events(&["2018-03-03", "2018-03-01", "2018-03-02"]),
            moods(&["2018-03-04", "2018-03-02", "2018-03-03"]),
        );

        assert_eq!(aligned.dates(), vec![date("2018-03-02"), date("2018-03-03")]);
        let day = aligned.get(0).unwrap();
        assert_eq!(day.timeline.date, day.date);
        assert_eq!(day.mood.date, day.date);
    }

    #[test]
    fn test_same_dates_either_way_round() {
        let a = ["2018-03-01", "2018-03-02", "2018-03-03"];
        let b = ["2018-03-02", "2018-03-03", "2018-03-04"];

        let left_first = align(events(&a), events(&b));
        let right_first = align(events(&b), events(&a));
        assert_eq!(left_first.dates(), right_first.dates());
    }

    #[test]
    fn test_no_overlap_is_empty() {
        let aligned = align(events(&["2018-01-01"]), moods(&["2018-02-01"]));
        assert!(aligned.is_empty());
    }

    #[test]
    fn test_empty_side() {
        assert!(align(events(&[]), moods(&["2018-02-01"])).is_empty());
        assert!(align(events(&["2018-02-01"]), moods(&[])).is_empty());
    }

    #[test]
    fn test_full_overlap() {
        let dates = ["2018-03-01", "2018-03-02"];
        let aligned = align(events(&dates), moods(&dates));
        assert_eq!(aligned.dates(), vec![date(dates[0]), date(dates[1])]);
    }
}
