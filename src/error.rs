//! Error types for dayscope

use crate::types::SourceKind;
use thiserror::Error;

/// Errors that can occur while loading, normalizing or navigating the timeline
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load {kind} data: {reason}")]
    SourceLoad { kind: SourceKind, reason: String },

    #[error("{kind} row {row}: missing required field '{field}'")]
    MissingField {
        kind: SourceKind,
        row: usize,
        field: String,
    },

    #[error("{kind} row {row}: cannot parse date '{value}'")]
    DateParse {
        kind: SourceKind,
        row: usize,
        value: String,
    },

    #[error("{kind} row {row}: cannot parse time '{value}'")]
    TimeParse {
        kind: SourceKind,
        row: usize,
        value: String,
    },

    #[error("{kind} row {row}: cannot parse number '{value}' in '{field}'")]
    NumberParse {
        kind: SourceKind,
        row: usize,
        field: String,
        value: String,
    },

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Trip {index} ends before it begins ({beginning} > {end})")]
    InvertedInterval {
        index: usize,
        beginning: String,
        end: String,
    },

    #[error("Transit log is unbalanced: {check_ins} check-ins vs {check_outs} check-outs")]
    PairingMismatch { check_ins: usize, check_outs: usize },

    #[error("No days with both timeline and mood data")]
    NoData,

    #[error("Configuration error: {0}")]
    Config(String),
}
