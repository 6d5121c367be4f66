//! Configuration types and CLI-facing enums.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and for configuring a run from library code.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::classify::{Country, Sector};
use crate::config::constants::{DB_PATH, DEFAULT_BATCH_SIZE, SETTINGS_PATH};
use crate::export::ReportFormat;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Optional country/sector restrictions applied right after the fetch.
///
/// `None` means "no restriction" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub country: Option<Country>,
    pub sector: Option<Sector>,
}

/// Library configuration for an analysis run (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use web_radar::RunConfig;
/// use std::path::PathBuf;
///
/// let config = RunConfig {
///     file: PathBuf::from("urls.txt"),
///     batch_size: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// File to read URLs from (`-` for stdin)
    pub file: PathBuf,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Analyzer settings file (created with defaults when missing)
    pub settings_path: PathBuf,

    /// URLs analyzed in parallel per batch
    pub batch_size: usize,

    /// Country/sector restrictions
    pub filters: Filters,

    /// Optional report written once the run finishes
    pub report: Option<(PathBuf, ReportFormat)>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("urls.txt"),
            db_path: PathBuf::from(DB_PATH),
            settings_path: PathBuf::from(SETTINGS_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
            filters: Filters::default(),
            report: None,
        }
    }
}
