//! Error type definitions.
//!
//! This module defines the library error enums and the counter categories
//! tracked while URLs are processed.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A JSON column could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Transport-level failure of a single fetch attempt.
///
/// HTTP error statuses are not fetch errors: a 404 page is still a page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Timeout, DNS failure, refused connection, TLS error, ...
    #[error("{0}")]
    Transport(#[from] ReqwestError),

    /// Status line and headers arrived but the body could not be read.
    #[error("HTTP {status_code}: response body could not be read: {source}")]
    UnreadableBody {
        status_code: u16,
        #[source]
        source: ReqwestError,
    },

    /// Failure reported by an `HttpFetcher` that does not go through reqwest.
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Status code of the response, when one was received before the failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::UnreadableBody { status_code, .. } => Some(*status_code),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            FetchError::Other(_) => None,
        }
    }
}

/// Failure of the external mobile-friendliness check.
///
/// Never propagated past the signal extractor, which fails open.
#[derive(Error, Debug)]
pub enum MobileCheckError {
    #[error("mobile check request failed: {0}")]
    Request(#[from] ReqwestError),

    #[error("mobile check returned HTTP {0}")]
    Status(u16),
}

/// Error types for the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is empty")]
    Empty,

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    InvalidUrl,
    FetchFailed,
    StoreWriteFailed,
    TaskPanicked,
}

/// Missing or degraded signals that did not stop the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    MissingTitle,
    MissingMetaDescription,
    MobileCheckFailed,
    PerformanceProbeFailed,
}

/// Notable events that are neither errors nor warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    Filtered,
    OutdatedCms,
    OutdatedCopyright,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::FetchFailed => "Fetch failed after retries",
            ErrorType::StoreWriteFailed => "Result store write failed",
            ErrorType::TaskPanicked => "Analysis task panicked",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingTitle => "Missing title",
            WarningType::MissingMetaDescription => "Missing meta description",
            WarningType::MobileCheckFailed => "Mobile check failed (assumed friendly)",
            WarningType::PerformanceProbeFailed => "Timed re-fetch failed",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::Filtered => "Filtered out by country/sector",
            InfoType::OutdatedCms => "Outdated CMS detected",
            InfoType::OutdatedCopyright => "Outdated copyright year",
        }
    }
}
