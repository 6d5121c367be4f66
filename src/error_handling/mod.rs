//! Error handling and processing statistics.
//!
//! This module provides:
//! - Library error enums (initialization, database, fetch, mobile check, settings)
//! - Processing statistics tracking (errors, warnings, info metrics)
//!
//! Counter categories:
//! - **Errors**: Failures that end a URL's analysis or lose its result
//! - **Warnings**: Missing or degraded signals that don't prevent scoring
//! - **Info**: Notable events (filtered URLs, outdated CMS, ...)

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    DatabaseError, ErrorType, FetchError, InfoType, InitializationError, MobileCheckError,
    SettingsError, WarningType,
};
