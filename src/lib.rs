//! dayscope - per-day timeline of personal logs
//!
//! dayscope turns small personal log exports into a day-by-day timeline through
//! a deterministic pipeline: source loading → row normalization → trip pairing
//! → day grouping → day alignment → navigation.
//!
//! ## Sources
//!
//! - **Transit**: OV-chipkaart check-in/check-out transactions, paired into trips
//! - **School**: lesson schedule
//! - **Sleep**: bedtime and last alarm per night
//! - **Mood**: arousal/valence samples
//!
//! Only days that have both timeline data (transit, school, sleep) and mood
//! data are navigable.

pub mod alignment;
pub mod config;
pub mod encoder;
pub mod error;
pub mod grouping;
pub mod loader;
#[cfg(feature = "cli")]
pub mod logging;
pub mod navigator;
pub mod pairing;
pub mod pipeline;
pub mod sources;
pub mod timeline;
pub mod types;

pub use config::DashboardConfig;
pub use error::TimelineError;
pub use navigator::Navigator;
pub use pipeline::{build_dashboard, build_from_rows, Dashboard, LoadSummary};

/// dayscope version embedded in snapshots
pub const DAYSCOPE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for snapshots
pub const PRODUCER_NAME: &str = "dayscope";
