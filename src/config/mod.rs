//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (thresholds, penalties, defaults)
//! - The on-disk analyzer settings (timeout, user agent, retries, API key)
//! - CLI option types and run configuration

mod constants;
mod settings;
mod types;

// Re-export all constants
pub use constants::*;
pub use settings::AnalyzerSettings;
pub use types::{Filters, LogFormat, LogLevel, RunConfig};
