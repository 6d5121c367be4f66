//! End-of-run summaries and aggregate statistics output.

use log::info;
use std::fmt::Write;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};
use crate::storage::{GroupStats, Statistics};

/// Prints a one-line summary of the run.
///
/// Works with both plain and JSON log formats (log::info! handles formatting).
pub fn print_run_summary(
    requested: usize,
    scored: usize,
    failed: usize,
    filtered: usize,
    cancelled: bool,
    elapsed_seconds: f64,
) {
    info!(
        "✅ Analyzed {} of {} URL{} ({} scored, {} failed, {} filtered) in {:.1}s{}",
        scored + failed + filtered,
        requested,
        if requested == 1 { "" } else { "s" },
        scored,
        failed,
        filtered,
        elapsed_seconds,
        if cancelled { " - cancelled" } else { "" }
    );
}

/// Prints error, warning, and info statistics to the log.
///
/// Sections with no events are skipped, as are zero counters.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    log_counts(
        "Error",
        error_stats.total_errors(),
        ErrorType::iter().map(|e| (e.as_str(), error_stats.get_error_count(e))),
    );
    log_counts(
        "Warning",
        error_stats.total_warnings(),
        WarningType::iter().map(|w| (w.as_str(), error_stats.get_warning_count(w))),
    );
    log_counts(
        "Info",
        error_stats.total_info(),
        InfoType::iter().map(|i| (i.as_str(), error_stats.get_info_count(i))),
    );
}

fn log_counts(section: &str, total: usize, counts: impl Iterator<Item = (&'static str, usize)>) {
    if total == 0 {
        return;
    }
    info!("{section} Counts ({total} total):");
    for (label, count) in counts.filter(|(_, count)| *count > 0) {
        info!("   {label}: {count}");
    }
}

fn write_groups(out: &mut String, heading: &str, groups: &[GroupStats]) -> std::fmt::Result {
    writeln!(out, "{heading}:")?;
    if groups.is_empty() {
        return writeln!(out, "  (none)");
    }
    for group in groups {
        writeln!(
            out,
            "  {:<16} {:>6} analyses  avg {:>6.2}",
            group.label, group.count, group.average_score
        )?;
    }
    Ok(())
}

fn write_statistics(out: &mut String, statistics: &Statistics) -> std::fmt::Result {
    writeln!(out, "Total analyses: {}", statistics.total_count)?;
    writeln!(out, "Average score:  {:.2}", statistics.average_score)?;
    write_groups(out, "By country", &statistics.by_country)?;
    write_groups(out, "By sector", &statistics.by_sector)
}

/// Renders aggregate statistics as a plain-text table for the terminal.
pub fn format_statistics(statistics: &Statistics) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_statistics(&mut out, statistics);
    out
}
