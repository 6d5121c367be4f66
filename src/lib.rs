//! web_radar library: SEO signal extraction, classification and scoring
//!
//! This library fetches a list of sites, extracts on-page signals (title, meta
//! description, headings, images, links, CMS, copyright year, page weight,
//! load time, mobile friendliness), labels each site with a country and a
//! business sector, scores it out of 100 and stores the result in SQLite.
//!
//! # Example
//!
//! ```no_run
//! use web_radar::{run_analysis, RunConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunConfig {
//!     file: std::path::PathBuf::from("urls.txt"),
//!     batch_size: 10,
//!     ..Default::default()
//! };
//!
//! let report = run_analysis(config).await?;
//! println!("Analyzed {} URLs: {} scored, {} failed, {} filtered",
//!          report.requested, report.scored, report.failed, report.filtered);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod classify;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod parse;
pub mod pipeline;
mod run;
pub mod score;
pub mod signals;
pub mod storage;
mod utils;

// Re-export public API
pub use classify::{Country, Sector};
pub use config::{AnalyzerSettings, Filters, LogFormat, LogLevel, RunConfig};
pub use export::{export_report, render_report, ReportFormat, ReportOptions};
pub use pipeline::{AnalysisResult, Analyzer, PipelineOutcome};
pub use run::{run_analysis, run_batches, AnalysisReport, BatchCallback, BatchRun};
pub use storage::{ResultStore, SqliteStore, Statistics, StoredAnalysis};
