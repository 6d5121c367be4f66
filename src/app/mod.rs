//! Main application modules.
//!
//! This module provides URL list reading, progress logging and the end-of-run
//! summaries used by the run entry point and the CLI.

pub mod logging;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::log_progress;
pub use statistics::{format_statistics, print_error_statistics, print_run_summary};
pub use self::url::{normalize_url, read_csv_urls, read_url_lines, read_urls};
