//! dayscope CLI - browse the per-day timeline from the command line
//!
//! Commands:
//! - days: List the days that have both timeline and mood data
//! - show: Print one day and what was active at a chosen time
//! - export: Write JSON snapshots of every day
//! - validate: Check that every source loads and the transit log is balanced

use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{NaiveDate, NaiveTime};
use tracing::level_filters::LevelFilter;

use dayscope::encoder::SnapshotEncoder;
use dayscope::loader::load_all;
use dayscope::logging::enable_logging;
use dayscope::pairing::{validate_pairing, PairingPolicy, PairingReport};
use dayscope::sources::{MoodAdapter, SchoolAdapter, SleepAdapter, SourceAdapter, TransitAdapter};
use dayscope::timeline::{format_hm, DayView};
use dayscope::types::SourceKind;
use dayscope::{build_dashboard, DashboardConfig, TimelineError, DAYSCOPE_VERSION};

/// dayscope - per-day timeline of transit, school, sleep and mood logs
#[derive(Parser)]
#[command(name = "dayscope")]
#[command(version = DAYSCOPE_VERSION)]
#[command(about = "Browse a per-day timeline of personal logs", long_about = None)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Transit log (OV-chipkaart export)
    #[arg(long, global = true)]
    transit: Option<PathBuf>,

    /// School schedule
    #[arg(long, global = true)]
    school: Option<PathBuf>,

    /// Sleep log
    #[arg(long, global = true)]
    sleep: Option<PathBuf>,

    /// Mood log
    #[arg(long, global = true)]
    mood: Option<PathBuf>,

    /// Pair an unbalanced transit log by position instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List days with both timeline and mood data
    Days {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one day
    Show {
        /// Day number, wrapped to the number of days
        #[arg(long, conflicts_with = "date")]
        day: Option<usize>,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Time of day to inspect (HH:MM)
        #[arg(long, conflicts_with = "position")]
        at: Option<String>,

        /// Slider position to inspect
        #[arg(long)]
        position: Option<f64>,

        /// Output as JSON snapshot
        #[arg(long)]
        json: bool,
    },

    /// Export JSON snapshots of every day
    Export {
        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Check that all sources load and the transit log is balanced
    Validate {
        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    enable_logging(cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), DayscopeCliError> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Days { json } => cmd_days(&config, json),
        Commands::Show {
            day,
            date,
            at,
            position,
            json,
        } => cmd_show(&config, day, date, at.as_deref(), position, json),
        Commands::Export { output, pretty } => cmd_export(&config, &output, pretty),
        Commands::Validate { json } => cmd_validate(&config, json),
    }
}

/// Config file first, then command-line overrides
fn resolve_config(cli: &Cli) -> Result<DashboardConfig, DayscopeCliError> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_path(path)?,
        None => DashboardConfig::default(),
    };

    let overrides = [
        (SourceKind::Transit, &cli.transit),
        (SourceKind::School, &cli.school),
        (SourceKind::Sleep, &cli.sleep),
        (SourceKind::Mood, &cli.mood),
    ];
    for (kind, path) in overrides {
        if let Some(path) = path {
            config.sources.get_mut(kind).path = path.clone();
        }
    }

    if cli.lenient {
        config.pairing = PairingPolicy::Lenient;
    }

    Ok(config)
}

fn cmd_days(config: &DashboardConfig, json: bool) -> Result<(), DayscopeCliError> {
    let dashboard = build_dashboard(config)?;
    let index = dashboard.navigator.index();

    let days: Vec<DayListing> = index
        .iter()
        .enumerate()
        .map(|(n, day)| DayListing {
            day: n,
            date: day.timeline.key(),
            events: day.timeline.len(),
            mood_samples: day.mood.len(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    if days.is_empty() {
        println!("No days with both timeline and mood data");
        return Ok(());
    }

    println!("{:>4}  {:<10}  {:>6}  {:>4}", "day", "date", "events", "mood");
    for listing in &days {
        println!(
            "{:>4}  {:<10}  {:>6}  {:>4}",
            listing.day, listing.date, listing.events, listing.mood_samples
        );
    }
    Ok(())
}

fn cmd_show(
    config: &DashboardConfig,
    day: Option<usize>,
    date: Option<NaiveDate>,
    at: Option<&str>,
    position: Option<f64>,
    json: bool,
) -> Result<(), DayscopeCliError> {
    let mut dashboard = build_dashboard(config)?;
    let navigator = &mut dashboard.navigator;

    if let Some(date) = date {
        if navigator.jump_to(date)?.is_none() {
            return Err(DayscopeCliError::DayNotFound(date.to_string()));
        }
    } else if let Some(n) = day {
        let offset = n as i64 - navigator.cursor()? as i64;
        navigator.step(offset)?;
    }

    let time = match (at, position) {
        (Some(at), _) => Some(
            NaiveTime::parse_from_str(at, "%H:%M")
                .map_err(|_| DayscopeCliError::InvalidTime(at.to_string()))?,
        ),
        (None, Some(position)) => Some(dashboard.scale.time_at(position)),
        (None, None) => None,
    };

    let navigator = &dashboard.navigator;
    let current = navigator.current()?;

    if json {
        let encoder = SnapshotEncoder::new(dashboard.scale);
        println!("{}", encoder.encode_day_to_json(current, time)?);
        return Ok(());
    }

    let view = DayView::new(current);
    println!(
        "{} ({})  [day {}/{}]",
        navigator.date_label()?,
        current.timeline.key(),
        navigator.cursor()? + 1,
        navigator.len()
    );

    println!("\nTimeline:");
    for event in view.events() {
        println!(
            "  {} - {}  {:<16}  {}",
            format_hm(&event.beginning),
            format_hm(&event.end),
            event.label.display_name(),
            event.description
        );
    }

    println!("\nMood:");
    for sample in view.mood_samples() {
        println!(
            "  {}  arousal {:>4}  valence {:>4}  {}",
            sample.time.format("%H:%M"),
            sample.arousal,
            sample.valence,
            sample.description
        );
    }

    if let Some(time) = time {
        println!("\nAt {}:", time.format("%H:%M"));
        match view.info_box(time) {
            Some(info) => println!(
                "  {}: {} ({})",
                info.label, info.description, info.time_range
            ),
            None => println!("  No activity"),
        }
        match view.mood_at(time) {
            Some(mood) => println!(
                "  Mood: arousal {}, valence {} ({})",
                mood.arousal, mood.valence, mood.description
            ),
            None => println!("  No mood reported yet"),
        }
    }

    Ok(())
}

fn cmd_export(config: &DashboardConfig, output: &Path, pretty: bool) -> Result<(), DayscopeCliError> {
    let dashboard = build_dashboard(config)?;
    let encoder = SnapshotEncoder::new(dashboard.scale);
    let snapshots = encoder.encode_index(dashboard.navigator.index());

    let output_data = if pretty {
        serde_json::to_string_pretty(&snapshots)?
    } else {
        serde_json::to_string(&snapshots)?
    };

    if output.to_string_lossy() == "-" {
        println!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(config: &DashboardConfig, json: bool) -> Result<(), DayscopeCliError> {
    let rows = load_all(&config.sources)?;

    let mut sources: Vec<SourceCheck> = Vec::new();
    let mut pairing: Option<PairingReport> = None;

    for kind in SourceKind::ALL {
        let raw = rows.get(kind);
        let result = match kind {
            SourceKind::Transit => TransitAdapter.normalize(raw).map(|transit| {
                pairing = Some(validate_pairing(&transit));
            }),
            SourceKind::School => SchoolAdapter.normalize(raw).map(|_| ()),
            SourceKind::Sleep => SleepAdapter.normalize(raw).map(|_| ()),
            SourceKind::Mood => MoodAdapter.normalize(raw).map(|_| ()),
        };
        sources.push(SourceCheck {
            source: kind,
            rows: raw.len(),
            error: result.err().map(|e| e.to_string()),
        });
    }

    let report = ValidationReport {
        balanced: pairing.as_ref().map(PairingReport::is_balanced).unwrap_or(false),
        pairing,
        sources,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        for check in &report.sources {
            let status = if check.error.is_some() { "[ERR]" } else { "[OK]" };
            println!("  {} {}: {} rows", status, check.source, check.rows);
            if let Some(error) = &check.error {
                println!("        {}", error);
            }
        }
        if let Some(pairing) = &report.pairing {
            println!(
                "\nTransit: {} check-ins, {} check-outs, {} other transactions",
                pairing.check_ins, pairing.check_outs, pairing.ignored
            );
        }
    }

    let failed = report.sources.iter().filter(|c| c.error.is_some()).count();
    if failed > 0 {
        Err(DayscopeCliError::ValidationFailed(format!(
            "{} source(s) failed to normalize",
            failed
        )))
    } else if !report.balanced {
        Err(DayscopeCliError::ValidationFailed(
            "transit log is unbalanced".to_string(),
        ))
    } else {
        Ok(())
    }
}

// Error types

#[derive(Debug)]
enum DayscopeCliError {
    Io(io::Error),
    Timeline(TimelineError),
    Json(serde_json::Error),
    DayNotFound(String),
    InvalidTime(String),
    ValidationFailed(String),
}

impl From<io::Error> for DayscopeCliError {
    fn from(e: io::Error) -> Self {
        DayscopeCliError::Io(e)
    }
}

impl From<TimelineError> for DayscopeCliError {
    fn from(e: TimelineError) -> Self {
        DayscopeCliError::Timeline(e)
    }
}

impl From<serde_json::Error> for DayscopeCliError {
    fn from(e: serde_json::Error) -> Self {
        DayscopeCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<DayscopeCliError> for CliError {
    fn from(e: DayscopeCliError) -> Self {
        match e {
            DayscopeCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            DayscopeCliError::Timeline(e) => {
                let (code, hint) = match &e {
                    TimelineError::SourceLoad { .. } => {
                        ("LOAD_ERROR", "Check the source paths in the configuration")
                    }
                    TimelineError::PairingMismatch { .. } => {
                        ("PAIRING_ERROR", "Run 'dayscope validate' or retry with --lenient")
                    }
                    TimelineError::NoData => {
                        ("NO_DATA", "Timeline and mood logs must share at least one date")
                    }
                    TimelineError::Config(_) => ("CONFIG_ERROR", "Check the configuration file"),
                    _ => ("PARSE_ERROR", "Check the row named in the message"),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            DayscopeCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            DayscopeCliError::DayNotFound(date) => CliError {
                code: "DAY_NOT_FOUND".to_string(),
                message: format!("No aligned data for {}", date),
                hint: Some("Run 'dayscope days' to list available dates".to_string()),
            },
            DayscopeCliError::InvalidTime(time) => CliError {
                code: "INVALID_TIME".to_string(),
                message: format!("Cannot parse time '{}'", time),
                hint: Some("Use HH:MM, e.g. 13:45".to_string()),
            },
            DayscopeCliError::ValidationFailed(message) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message,
                hint: Some("Fix the reported sources and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DayListing {
    day: usize,
    date: String,
    events: usize,
    mood_samples: usize,
}

#[derive(serde::Serialize)]
struct SourceCheck {
    source: SourceKind,
    rows: usize,
    error: Option<String>,
}

#[derive(serde::Serialize)]
struct ValidationReport {
    sources: Vec<SourceCheck>,
    pairing: Option<PairingReport>,
    balanced: bool,
}
