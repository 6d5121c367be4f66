//! Report generation from stored analyses.
//!
//! Reports are rendered from the database, not from an in-flight run, so a
//! report can be produced at any time over whatever history exists:
//! - HTML: a self-contained page with statistics and one card per analysis
//! - CSV: one flat row per analysis
//! - JSON: statistics plus the full stored records

mod csv;
mod html;
mod json;
mod types;

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PRIORITY_SCORE_THRESHOLD;
use crate::pipeline::ResultKind;
use crate::storage::{SqliteStore, Statistics, StoredAnalysis};

pub use self::csv::render_csv;
pub use html::{escape_html, render_html, score_band};
pub use json::render_json;
pub use types::{ReportFormat, ReportOptions, ScoreDistribution};

/// Renders `analyses` in `format`.
pub fn render_report(
    format: ReportFormat,
    analyses: &[StoredAnalysis],
    statistics: &Statistics,
) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Html => render_html(analyses, statistics),
        ReportFormat::Csv => render_csv(analyses),
        ReportFormat::Json => render_json(analyses, statistics),
    }
}

/// Applies the priority filter to rows already read from the store.
///
/// Priority prospects are scored (never failed) results below
/// [`PRIORITY_SCORE_THRESHOLD`], worst first.
pub fn select_report_rows(mut analyses: Vec<StoredAnalysis>, priority_only: bool) -> Vec<StoredAnalysis> {
    if !priority_only {
        return analyses;
    }
    analyses.retain(|a| {
        a.result.kind() == ResultKind::Scored && a.result.score < PRIORITY_SCORE_THRESHOLD
    });
    // Stable sort keeps newest-first order among equal scores
    analyses.sort_by_key(|a| a.result.score);
    analyses
}

/// Writes a report to `options.output` and returns the number of analyses in it.
pub async fn export_report(store: &SqliteStore, options: &ReportOptions) -> Result<usize> {
    // Priority filtering happens after the read, so the limit applies to what survives it
    let fetch_limit = if options.priority_only {
        usize::MAX
    } else {
        options.limit
    };
    let analyses = store
        .analyses(&options.filters, fetch_limit)
        .await
        .context("Failed to read analyses for report")?;
    let mut analyses = select_report_rows(analyses, options.priority_only);
    analyses.truncate(options.limit);
    write_analyses_report(store, &analyses, options.format, &options.output).await
}

/// Renders exactly `analyses`, with statistics over the whole store, to
/// `output`. Returns the number of analyses written.
pub async fn write_analyses_report(
    store: &SqliteStore,
    analyses: &[StoredAnalysis],
    format: ReportFormat,
    output: &Path,
) -> Result<usize> {
    let statistics = store
        .statistics()
        .await
        .context("Failed to compute statistics for report")?;

    let bytes = render_report(format, analyses, &statistics)?;
    write_report(output, &bytes).await?;

    log::info!(
        "Wrote {} report with {} analyses to {}",
        format.extension(),
        analyses.len(),
        output.display()
    );
    Ok(analyses.len())
}

async fn write_report(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
