//! Day grouping
//!
//! Groups dated records into per-day buckets. Buckets are ordered by calendar
//! date and keep the input order of their records.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::types::{DayBucket, DayIndex, Dated, Event, EventLabel};

/// Group records by date into a chronologically sorted index
pub fn group_by_day<T, I>(records: I) -> DayIndex<T>
where
    T: Dated,
    I: IntoIterator<Item = T>,
{
    let mut by_date: BTreeMap<NaiveDate, DayBucket<T>> = BTreeMap::new();
    let mut total = 0usize;

    for record in records {
        let date = record.date();
        by_date
            .entry(date)
            .or_insert_with(|| DayBucket::new(date))
            .records
            .push(record);
        total += 1;
    }

    debug!(records = total, days = by_date.len(), "grouped records by day");

    DayIndex {
        buckets: by_date.into_values().collect(),
    }
}

/// Labels without duplicates, ordered by display name, used to assign one
/// color per category
pub fn distinct_labels<'a, I>(events: I) -> Vec<EventLabel>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut labels: Vec<EventLabel> = events.into_iter().map(|e| e.label).collect();
    // Byte order of the display names: "School" < "Slaap" < "openbaar vervoer"
    labels.sort_by_key(|label| label.display_name());
    labels.dedup();
    labels
}
