//! Source file loading
//!
//! Reads delimited text files into `RawRow`s. The four sources are read in
//! parallel, one scoped thread each, and the load succeeds only if every
//! source does.

use std::fs::File;
use std::io::{BufReader, Read};
use std::thread;

use tracing::{debug, info, instrument};

use crate::config::{SourceFile, SourcePaths};
use crate::error::TimelineError;
use crate::types::{RawRow, SourceKind};

/// Raw rows of every source, as loaded from disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRows {
    pub transit: Vec<RawRow>,
    pub school: Vec<RawRow>,
    pub sleep: Vec<RawRow>,
    pub mood: Vec<RawRow>,
}

impl SourceRows {
    pub fn get(&self, kind: SourceKind) -> &[RawRow] {
        match kind {
            SourceKind::Transit => &self.transit,
            SourceKind::School => &self.school,
            SourceKind::Sleep => &self.sleep,
            SourceKind::Mood => &self.mood,
        }
    }

    fn set(&mut self, kind: SourceKind, rows: Vec<RawRow>) {
        match kind {
            SourceKind::Transit => self.transit = rows,
            SourceKind::School => self.school = rows,
            SourceKind::Sleep => self.sleep = rows,
            SourceKind::Mood => self.mood = rows,
        }
    }
}

/// Parse delimited text with a header row into raw rows
///
/// Cells are trimmed; records shorter than the header simply lack the
/// trailing columns.
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawRow>, TimelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Load one source file
#[instrument(skip(file), fields(path = %file.path.display()))]
pub fn load_source(kind: SourceKind, file: &SourceFile) -> Result<Vec<RawRow>, TimelineError> {
    let load_error = |reason: String| TimelineError::SourceLoad { kind, reason };

    let delimiter = u8::try_from(file.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            TimelineError::Config(format!(
                "{} delimiter '{}' must be a single ASCII character",
                kind, file.delimiter
            ))
        })?;

    let handle = File::open(&file.path)
        .map_err(|e| load_error(format!("{}: {}", file.path.display(), e)))?;
    let rows = read_rows(BufReader::new(handle), delimiter)
        .map_err(|e| load_error(format!("{}: {}", file.path.display(), e)))?;

    debug!(rows = rows.len(), "loaded source");
    Ok(rows)
}

/// Load all four sources concurrently; any failure fails the whole load
#[instrument(skip(paths))]
pub fn load_all(paths: &SourcePaths) -> Result<SourceRows, TimelineError> {
    let results: Vec<(SourceKind, Result<Vec<RawRow>, TimelineError>)> = thread::scope(|scope| {
        let handles: Vec<_> = SourceKind::ALL
            .iter()
            .map(|&kind| {
                let file = paths.get(kind);
                (kind, scope.spawn(move || load_source(kind, file)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(kind, handle)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(TimelineError::SourceLoad {
                        kind,
                        reason: "loader thread panicked".to_string(),
                    })
                });
                (kind, result)
            })
            .collect()
    });

    let mut rows = SourceRows::default();
    for (kind, result) in results {
        rows.set(kind, result?);
    }

    info!(
        transit = rows.transit.len(),
        school = rows.school.len(),
        sleep = rows.sleep.len(),
        mood = rows.mood.len(),
        "loaded all sources"
    );
    Ok(rows)
}
