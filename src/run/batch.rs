//! Batch execution of the per-URL pipeline.
//!
//! URLs run in fixed-size batches. Every URL of a batch is its own tokio task;
//! each task persists its own result, then sends the outcome over a channel
//! that the runner drains once the whole batch has joined. Batch N+1 is only
//! started after batch N is fully drained.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app::log_progress;
use crate::config::Filters;
use crate::error_handling::ErrorType;
use crate::pipeline::{AnalysisResult, Analyzer, PipelineOutcome};
use crate::storage::ResultStore;

/// Called with every finished batch, before the next batch starts.
pub type BatchCallback<'a> = &'a (dyn Fn(&[PipelineOutcome]) + Send + Sync);

/// Message recorded for a URL whose task panicked.
const TASK_PANICKED_MESSAGE: &str = "analysis task panicked";

/// Everything the runner produced.
#[derive(Debug, Default)]
pub struct BatchRun {
    /// Outcomes in batch order; unordered within a batch
    pub outcomes: Vec<PipelineOutcome>,
    /// Record ids the store returned for this run's results
    pub saved_ids: Vec<i64>,
    /// Whether cancellation stopped the run before every URL was started
    pub cancelled: bool,
    pub batches: usize,
}

/// Runs the pipeline over `urls`, `batch_size` at a time.
///
/// `cancel` is checked before each batch and before each URL. Once raised,
/// tasks already started finish and are recorded, but nothing new starts.
/// A failing store write or a panicking task is counted and logged; neither
/// stops the run.
pub async fn run_batches(
    analyzer: Arc<Analyzer>,
    urls: &[String],
    filters: &Filters,
    batch_size: usize,
    store: Arc<dyn ResultStore>,
    cancel: &CancellationToken,
    on_batch: Option<BatchCallback<'_>>,
) -> BatchRun {
    let start_time = Instant::now();
    let mut run = BatchRun::default();

    for chunk in urls.chunks(batch_size.max(1)) {
        if cancel.is_cancelled() {
            log::info!("Cancellation requested, not starting further batches");
            run.cancelled = true;
            break;
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut started: Vec<&String> = Vec::with_capacity(chunk.len());
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(chunk.len());
        for url in chunk {
            if cancel.is_cancelled() {
                log::info!("Cancellation requested, skipping the rest of the batch");
                run.cancelled = true;
                break;
            }
            let handle = spawn_url_task(
                Arc::clone(&analyzer),
                url.clone(),
                filters.clone(),
                Arc::clone(&store),
                tx.clone(),
            );
            started.push(url);
            handles.push(handle);
        }
        drop(tx);

        let mut batch = Vec::with_capacity(handles.len());
        for (url, joined) in started.into_iter().zip(join_all(handles).await) {
            if let Err(join_error) = joined {
                log::warn!("Task for {url} panicked: {join_error:?}");
                analyzer.stats().increment_error(ErrorType::TaskPanicked);
                let result = AnalysisResult::failure(url, TASK_PANICKED_MESSAGE, None);
                run.saved_ids
                    .extend(persist(store.as_ref(), &analyzer, &result).await);
                batch.push(PipelineOutcome::Failed(result));
            }
        }
        while let Some((outcome, saved_id)) = rx.recv().await {
            run.saved_ids.extend(saved_id);
            batch.push(outcome);
        }

        run.batches += 1;
        run.outcomes.extend(batch.iter().cloned());
        log_progress(start_time, run.outcomes.len(), urls.len());
        if let Some(callback) = on_batch {
            callback(&batch);
        }

        if run.cancelled {
            break;
        }
    }

    run
}

fn spawn_url_task(
    analyzer: Arc<Analyzer>,
    url: String,
    filters: Filters,
    store: Arc<dyn ResultStore>,
    tx: mpsc::UnboundedSender<(PipelineOutcome, Option<i64>)>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = analyzer.process(&url, &filters).await;
        let saved_id = match outcome.result() {
            Some(result) => persist(store.as_ref(), &analyzer, result).await,
            None => None,
        };
        // The receiver outlives every task of the batch
        let _ = tx.send((outcome, saved_id));
    })
}

/// Saves one result; the record id, or `None` when the write failed.
async fn persist(
    store: &dyn ResultStore,
    analyzer: &Analyzer,
    result: &AnalysisResult,
) -> Option<i64> {
    match store.save(result).await {
        Ok(id) => {
            log::debug!("Stored {} as analysis {}", result.url, id);
            Some(id)
        }
        Err(e) => {
            log::warn!("Failed to store result for {}: {}", result.url, e);
            analyzer.stats().increment_error(ErrorType::StoreWriteFailed);
            None
        }
    }
}
