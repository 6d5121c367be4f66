//! Progress logging utilities.

use log::info;
use std::time::Instant;

/// Logs cumulative progress after a batch.
///
/// # Arguments
///
/// * `start_time` - When the run started
/// * `processed` - URLs finished so far
/// * `total` - URLs requested for the run
pub fn log_progress(start_time: Instant, processed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} URLs in {:.2} seconds (~{:.2} URLs/sec)",
        processed, total, elapsed_secs, rate
    );
}
