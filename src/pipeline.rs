//! Pipeline orchestration
//!
//! This module provides the public API for dayscope. It runs the full pipeline
//! from source files (or already loaded rows) to a navigable dashboard.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::alignment::align;
use crate::config::{DashboardConfig, PipelineOptions};
use crate::error::TimelineError;
use crate::grouping::group_by_day;
use crate::loader::{load_all, SourceRows};
use crate::navigator::Navigator;
use crate::pairing::pair_trips;
use crate::sources::{MoodAdapter, SchoolAdapter, SleepAdapter, SourceAdapter, TransitAdapter};
use crate::timeline::TimeScale;
use crate::types::{Event, Interval, MoodSample};

/// Record counts of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub transit_rows: usize,
    pub school_rows: usize,
    pub sleep_rows: usize,
    pub mood_rows: usize,
    pub trips: usize,
    pub timeline_events: usize,
    pub timeline_days: usize,
    pub mood_days: usize,
    pub aligned_days: usize,
}

/// Loaded, aligned data plus the day cursor
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub navigator: Navigator,
    pub summary: LoadSummary,
    pub scale: TimeScale,
}

/// Load every configured source and build the dashboard.
///
/// Pipeline stages:
/// 1. Loader - read the four source files concurrently
/// 2. SourceAdapter - normalize rows per source
/// 3. Pairing - turn check-ins and check-outs into trips
/// 4. Grouping - bucket timeline events and mood samples by day
/// 5. Alignment - keep days present on both sides
#[instrument(skip(config))]
pub fn build_dashboard(config: &DashboardConfig) -> Result<Dashboard, TimelineError> {
    let rows = load_all(&config.sources)?;
    let mut dashboard = build_from_rows(&rows, config.options())?;
    dashboard.scale = TimeScale::new(config.slider_width);
    Ok(dashboard)
}

/// Run stages 2-5 on rows that are already loaded
pub fn build_from_rows(
    rows: &SourceRows,
    options: PipelineOptions,
) -> Result<Dashboard, TimelineError> {
    let transit = TransitAdapter.normalize(&rows.transit)?;
    let school = SchoolAdapter.normalize(&rows.school)?;
    let sleep = SleepAdapter.normalize(&rows.sleep)?;
    let mood = MoodAdapter.normalize(&rows.mood)?;

    let trips = pair_trips(&transit, options.pairing)?;
    let trip_count = trips.len();

    // Same order as the dashboard draws them: trips, school, sleep
    let events: Vec<Event> = trips
        .into_iter()
        .flat_map(Interval::into_events)
        .chain(school)
        .chain(sleep)
        .collect();
    let timeline_events = events.len();

    let timeline_index = group_by_day(events);
    let mood_index = group_by_day::<MoodSample, _>(mood);
    let timeline_days = timeline_index.len();
    let mood_days = mood_index.len();

    let aligned = align(timeline_index, mood_index);

    let summary = LoadSummary {
        transit_rows: rows.transit.len(),
        school_rows: rows.school.len(),
        sleep_rows: rows.sleep.len(),
        mood_rows: rows.mood.len(),
        trips: trip_count,
        timeline_events,
        timeline_days,
        mood_days,
        aligned_days: aligned.len(),
    };

    info!(
        trips = summary.trips,
        timeline_days = summary.timeline_days,
        mood_days = summary.mood_days,
        aligned_days = summary.aligned_days,
        "built dashboard"
    );

    Ok(Dashboard {
        navigator: Navigator::new(aligned, options.start_day),
        summary,
        scale: TimeScale::default(),
    })
}
