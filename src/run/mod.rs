//! Library entry point for an analysis run.
//!
//! [`run_analysis`] wires settings, the HTTP fetcher, the SQLite store and the
//! batch runner together, and turns Ctrl-C into cooperative cancellation.

mod batch;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::app::{print_error_statistics, print_run_summary, read_urls};
use crate::config::{AnalyzerSettings, RunConfig};
use crate::error_handling::ProcessingStats;
use crate::export::write_analyses_report;
use crate::pipeline::{AnalysisResult, Analyzer, PipelineOutcome};
use crate::storage::{ResultStore, SqliteStore};

pub use batch::{run_batches, BatchCallback, BatchRun};

/// Results of an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// URLs read from the input
    pub requested: usize,
    pub scored: usize,
    pub failed: usize,
    /// URLs excluded by the country/sector filters (not stored)
    pub filtered: usize,
    /// Whether Ctrl-C stopped the run early
    pub cancelled: bool,
    /// Scored and failed results, in batch order
    pub results: Vec<AnalysisResult>,
    pub elapsed_seconds: f64,
    /// Path to the SQLite database containing results
    pub db_path: PathBuf,
}

impl AnalysisReport {
    fn from_outcomes(
        requested: usize,
        outcomes: Vec<PipelineOutcome>,
        cancelled: bool,
        elapsed_seconds: f64,
        db_path: PathBuf,
    ) -> Self {
        let mut report = Self {
            requested,
            scored: 0,
            failed: 0,
            filtered: 0,
            cancelled,
            results: Vec::with_capacity(outcomes.len()),
            elapsed_seconds,
            db_path,
        };
        for outcome in outcomes {
            match outcome {
                PipelineOutcome::Scored(result) => {
                    report.scored += 1;
                    report.results.push(result);
                }
                PipelineOutcome::Failed(result) => {
                    report.failed += 1;
                    report.results.push(result);
                }
                PipelineOutcome::Filtered(_) => report.filtered += 1,
            }
        }
        report
    }
}

/// Runs an analysis with the provided configuration.
///
/// Reads the URL list, analyzes it batch by batch, stores every scored or
/// failed result, and optionally writes a report of what was stored.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the database cannot be
/// opened, the HTTP client cannot be built, or the requested report cannot
/// be written. Per-URL failures are never errors; they are results.
///
/// # Example
///
/// ```no_run
/// use web_radar::{run_analysis, RunConfig};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RunConfig {
///     file: PathBuf::from("urls.txt"),
///     ..Default::default()
/// };
/// let report = run_analysis(config).await?;
/// println!("Scored {} of {} URLs", report.scored, report.requested);
/// # Ok(())
/// # }
/// ```
pub async fn run_analysis(config: RunConfig) -> Result<AnalysisReport> {
    let settings = AnalyzerSettings::load_or_init(&config.settings_path).with_env_overrides();
    let urls = read_urls(&config.file).await?;

    let store = SqliteStore::open(&config.db_path)
        .await
        .context("Failed to open results database")?;

    let stats = Arc::new(ProcessingStats::new());
    let analyzer = Arc::new(
        Analyzer::from_settings(settings)
            .context("Failed to initialize HTTP client")?
            .with_stats(Arc::clone(&stats)),
    );

    let cancel = CancellationToken::new();
    let watcher_done = CancellationToken::new();
    let watcher = spawn_ctrl_c_watcher(cancel.clone(), watcher_done.clone());

    info!(
        "Analyzing {} URLs in batches of {}",
        urls.len(),
        config.batch_size.max(1)
    );
    let start_time = Instant::now();
    let log_batch = |batch: &[PipelineOutcome]| {
        for outcome in batch {
            match outcome {
                PipelineOutcome::Scored(r) => info!(
                    "{}: {}/100 ({}, {}, {} issues)",
                    r.url,
                    r.score,
                    r.country,
                    r.sector,
                    r.issues.len()
                ),
                PipelineOutcome::Failed(r) => {
                    info!("{}: failed ({})", r.url, r.issues.join("; "))
                }
                PipelineOutcome::Filtered(f) => info!(
                    "{}: filtered by {} ({} / {})",
                    f.url, f.excluded_by, f.country, f.sector
                ),
            }
        }
    };
    let run = run_batches(
        Arc::clone(&analyzer),
        &urls,
        &config.filters,
        config.batch_size,
        Arc::new(store.clone()) as Arc<dyn ResultStore>,
        &cancel,
        Some(&log_batch),
    )
    .await;

    watcher_done.cancel();
    if let Err(join_error) = watcher.await {
        log::debug!("Ctrl-C watcher ended abnormally: {join_error:?}");
    }

    let report = AnalysisReport::from_outcomes(
        urls.len(),
        run.outcomes,
        run.cancelled,
        start_time.elapsed().as_secs_f64(),
        config.db_path.clone(),
    );

    print_error_statistics(&stats);
    print_run_summary(
        report.requested,
        report.scored,
        report.failed,
        report.filtered,
        report.cancelled,
        report.elapsed_seconds,
    );

    if let Some((output, format)) = &config.report {
        // Exactly this run's stored rows, whatever else the database holds
        let analyses = store
            .analyses_by_ids(&run.saved_ids)
            .await
            .context("Failed to read this run's analyses for the report")?;
        write_analyses_report(&store, &analyses, *format, output).await?;
    }

    store.close().await;
    Ok(report)
}

/// Cancels `cancel` on Ctrl-C; exits quietly once `done` is raised.
fn spawn_ctrl_c_watcher(
    cancel: CancellationToken,
    done: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    warn!("Ctrl-C received, finishing the current batch");
                    cancel.cancel();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
            },
            _ = done.cancelled() => {}
        }
    })
}
