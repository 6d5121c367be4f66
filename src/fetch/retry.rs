//! Fixed-interval retry around a single fetch.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;

use super::{FetchResult, HttpFetcher};

/// Fetches `url`, retrying transport failures.
///
/// `attempts` is the total number of tries (0 is treated as 1) and `delay`
/// the pause between them. HTTP error statuses are responses and are never
/// retried. After the last failed attempt the result carries that attempt's
/// error message, plus the status code when a response had arrived.
pub async fn fetch_with_retry(
    fetcher: &dyn HttpFetcher,
    url: &str,
    attempts: u32,
    delay: Duration,
) -> FetchResult {
    let attempts = attempts.max(1);
    let retry_strategy = FixedInterval::new(delay).take(attempts as usize - 1);
    let attempt_count = AtomicU32::new(0);

    let result = Retry::spawn(retry_strategy, || {
        let attempt = attempt_count.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            log::debug!("Fetching {url} (attempt {attempt}/{attempts})");
            fetcher.get(url).await.map_err(|e| {
                if attempt < attempts {
                    log::warn!("Attempt {attempt}/{attempts} for {url} failed, retrying: {e}");
                }
                e
            })
        }
    })
    .await;

    let made = attempt_count.load(Ordering::SeqCst);
    match result {
        Ok(response) => FetchResult::success(url, response, made),
        Err(e) => {
            log::warn!("Giving up on {url} after {made} attempt(s): {e}");
            FetchResult::failure(url, e.to_string(), e.status_code(), made)
        }
    }
}
