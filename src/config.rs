//! Dashboard configuration
//!
//! Read from a JSON file; every field has a default so a partial file (or no
//! file at all) is valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TimelineError;
use crate::pairing::PairingPolicy;
use crate::timeline::DEFAULT_SLIDER_WIDTH;
use crate::types::SourceKind;

/// Location and delimiter of one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }
}

fn default_delimiter() -> char {
    ','
}

/// The four source files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePaths {
    pub transit: SourceFile,
    pub school: SourceFile,
    pub sleep: SourceFile,
    pub mood: SourceFile,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            transit: SourceFile::new("data/ovlog.csv", ','),
            school: SourceFile::new("data/school_schedule.csv", ','),
            sleep: SourceFile::new("data/sleep.csv", ','),
            mood: SourceFile::new("data/mood.csv", ','),
        }
    }
}

impl SourcePaths {
    pub fn get(&self, kind: SourceKind) -> &SourceFile {
        match kind {
            SourceKind::Transit => &self.transit,
            SourceKind::School => &self.school,
            SourceKind::Sleep => &self.sleep,
            SourceKind::Mood => &self.mood,
        }
    }

    pub fn get_mut(&mut self, kind: SourceKind) -> &mut SourceFile {
        match kind {
            SourceKind::Transit => &mut self.transit,
            SourceKind::School => &mut self.school,
            SourceKind::Sleep => &mut self.sleep,
            SourceKind::Mood => &mut self.mood,
        }
    }
}

/// Pipeline options that do not depend on file locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub pairing: PairingPolicy,
    pub start_day: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            pairing: PairingPolicy::Strict,
            start_day: 0,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub sources: SourcePaths,
    pub pairing: PairingPolicy,
    /// Initial day cursor, wrapped to the number of aligned days
    pub start_day: usize,
    pub slider_width: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: SourcePaths::default(),
            pairing: PairingPolicy::Strict,
            start_day: 0,
            slider_width: DEFAULT_SLIDER_WIDTH,
        }
    }
}

impl DashboardConfig {
    pub fn options(&self) -> PipelineOptions {
        PipelineOptions {
            pairing: self.pairing,
            start_day: self.start_day,
        }
    }

    /// Parse configuration JSON
    pub fn from_json(json: &str) -> Result<Self, TimelineError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, TimelineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TimelineError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, TimelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), TimelineError> {
        if self.slider_width == 0 {
            return Err(TimelineError::Config(
                "slider_width must be greater than zero".to_string(),
            ));
        }
        for kind in SourceKind::ALL {
            let delimiter = self.sources.get(kind).delimiter;
            if !delimiter.is_ascii() {
                return Err(TimelineError::Config(format!(
                    "{} delimiter must be a single ASCII character",
                    kind
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.sources.transit.delimiter, ',');
        assert_eq!(config.slider_width, 1400);
    }

    #[test]
    fn test_partial_config() {
        let config = DashboardConfig::from_json(
            r#"{
                "sources": { "mood": { "path": "logs/emoties.csv" } },
                "pairing": "lenient",
                "start_day": 11
            }"#,
        )
        .unwrap();

        assert_eq!(config.sources.mood.path, PathBuf::from("logs/emoties.csv"));
        assert_eq!(config.sources.mood.delimiter, ',');
        assert_eq!(config.sources.school, SourcePaths::default().school);
        assert_eq!(config.pairing, PairingPolicy::Lenient);
        assert_eq!(config.start_day, 11);
    }

    #[test]
    fn test_semicolon_transit_via_config() {
        let config = DashboardConfig::from_json(
            r#"{ "sources": { "transit": { "path": "data/ovlog.csv", "delimiter": ";" } } }"#,
        )
        .unwrap();
        assert_eq!(config.sources.transit.delimiter, ';');
        assert_eq!(config.sources.school.delimiter, ',');
    }

    #[test]
    fn test_rejects_zero_width() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "slider_width": 0 }"#),
            Err(TimelineError::Config(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = DashboardConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(DashboardConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let result = DashboardConfig::from_path(Path::new("/nonexistent/dayscope.json"));
        assert!(matches!(result, Err(TimelineError::Config(_))));
    }
}
