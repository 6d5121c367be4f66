//! Batch runner behaviour: cancellation, batch ordering, and fault isolation.

mod helpers;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use helpers::{fast_settings, FailingStore, FakeFetcher, RecordingStore, GOOD_PAGE};
use web_radar::error_handling::ErrorType;
use web_radar::pipeline::ResultKind;
use web_radar::{run_batches, Analyzer, Country, Filters, PipelineOutcome, ResultStore};

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

fn set(list: &[&str]) -> HashSet<String> {
    list.iter().map(|u| u.to_string()).collect()
}

#[tokio::test]
async fn test_cancellation_mid_batch_finishes_batch_and_starts_nothing_else() {
    let cancel = CancellationToken::new();
    let fetcher = Arc::new(
        FakeFetcher::default()
            .with_page("https://a.fr", GOOD_PAGE)
            .with_page("https://b.fr", GOOD_PAGE)
            .with_page("https://c.fr", GOOD_PAGE)
            .with_page("https://d.fr", GOOD_PAGE)
            .cancelling(cancel.clone()),
    );
    let analyzer = Arc::new(Analyzer::new(fast_settings(), fetcher.clone(), None));
    let store = Arc::new(RecordingStore::default());

    let run = run_batches(
        analyzer,
        &urls(&["https://a.fr", "https://b.fr", "https://c.fr", "https://d.fr"]),
        &Filters::default(),
        2,
        store.clone() as Arc<dyn ResultStore>,
        &cancel,
        None,
    )
    .await;

    assert!(run.cancelled);
    assert_eq!(run.batches, 1);
    assert_eq!(run.outcomes.len(), 2);
    assert_eq!(fetcher.requested_urls(), set(&["https://a.fr", "https://b.fr"]));
    assert_eq!(store.saved_urls(), set(&["https://a.fr", "https://b.fr"]));
}

#[tokio::test]
async fn test_cancel_before_start_runs_nothing() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let fetcher = Arc::new(FakeFetcher::default().with_page("https://a.fr", GOOD_PAGE));
    let analyzer = Arc::new(Analyzer::new(fast_settings(), fetcher.clone(), None));
    let store = Arc::new(RecordingStore::default());

    let run = run_batches(
        analyzer,
        &urls(&["https://a.fr"]),
        &Filters::default(),
        5,
        store.clone() as Arc<dyn ResultStore>,
        &cancel,
        None,
    )
    .await;

    assert!(run.cancelled);
    assert!(run.outcomes.is_empty());
    assert!(fetcher.requested_urls().is_empty());
    assert!(store.saved().is_empty());
}

#[tokio::test]
async fn test_callback_sees_whole_batches_in_submission_order() {
    let list = ["https://a.fr", "https://b.fr", "https://c.fr", "https://d.fr", "https://e.fr"];
    let mut fetcher = FakeFetcher::default();
    for url in list {
        fetcher = fetcher.with_page(url, GOOD_PAGE);
    }
    let analyzer = Arc::new(Analyzer::new(fast_settings(), Arc::new(fetcher), None));
    let store = Arc::new(RecordingStore::default());
    let seen: Mutex<Vec<HashSet<String>>> = Mutex::new(Vec::new());
    let on_batch = |batch: &[PipelineOutcome]| {
        let urls = batch.iter().map(|o| o.url().to_string()).collect();
        seen.lock().unwrap().push(urls);
    };

    let run = run_batches(
        analyzer,
        &urls(&list),
        &Filters::default(),
        2,
        store.clone() as Arc<dyn ResultStore>,
        &CancellationToken::new(),
        Some(&on_batch),
    )
    .await;

    assert!(!run.cancelled);
    assert_eq!(run.batches, 3);
    assert_eq!(run.outcomes.len(), 5);
    let seen = seen.into_inner().unwrap();
    assert_eq!(
        seen,
        vec![
            set(&["https://a.fr", "https://b.fr"]),
            set(&["https://c.fr", "https://d.fr"]),
            set(&["https://e.fr"]),
        ]
    );
    assert_eq!(store.saved().len(), 5);
}

#[tokio::test]
async fn test_failures_and_filters_do_not_affect_siblings() {
    let fetcher = FakeFetcher::default()
        .with_page("https://good.fr", GOOD_PAGE)
        .with_page("https://elsewhere.de", GOOD_PAGE);
    let analyzer = Arc::new(Analyzer::new(fast_settings(), Arc::new(fetcher), None));
    let store = Arc::new(RecordingStore::default());
    let filters = Filters {
        country: Some(Country::France),
        sector: None,
    };

    let run = run_batches(
        analyzer,
        &urls(&["https://good.fr", "https://down.fr", "not a url", "https://elsewhere.de"]),
        &filters,
        5,
        store.clone() as Arc<dyn ResultStore>,
        &CancellationToken::new(),
        None,
    )
    .await;

    assert_eq!(run.outcomes.len(), 4);
    let filtered: Vec<_> = run
        .outcomes
        .iter()
        .filter(|o| matches!(o, PipelineOutcome::Filtered(_)))
        .collect();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].url(), "https://elsewhere.de");

    // Filtered URLs are never persisted
    let saved = store.saved();
    assert_eq!(saved.len(), 3);
    let failed = saved.iter().filter(|r| r.kind() == ResultKind::Failed).count();
    assert_eq!(failed, 2);

    let mut ids = run.saved_ids.clone();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_panicking_task_becomes_failed_result() {
    let fetcher = FakeFetcher::default()
        .with_page("https://ok.fr", GOOD_PAGE)
        .panicking_on("https://boom.fr");
    let analyzer = Arc::new(Analyzer::new(fast_settings(), Arc::new(fetcher), None));
    let store = Arc::new(RecordingStore::default());

    let run = run_batches(
        Arc::clone(&analyzer),
        &urls(&["https://boom.fr", "https://ok.fr"]),
        &Filters::default(),
        5,
        store.clone() as Arc<dyn ResultStore>,
        &CancellationToken::new(),
        None,
    )
    .await;

    assert_eq!(run.outcomes.len(), 2);
    assert_eq!(analyzer.stats().get_error_count(ErrorType::TaskPanicked), 1);
    let boom = run
        .outcomes
        .iter()
        .find_map(|o| o.result().filter(|r| r.url == "https://boom.fr"))
        .expect("panicked URL should still have a result");
    assert_eq!(boom.score, 0);
    assert_eq!(boom.issues, vec!["Error: analysis task panicked"]);
    assert_eq!(store.saved_urls(), set(&["https://boom.fr", "https://ok.fr"]));
}

#[tokio::test]
async fn test_store_failures_are_counted_not_fatal() {
    let fetcher = FakeFetcher::default().with_page("https://a.fr", GOOD_PAGE);
    let analyzer = Arc::new(Analyzer::new(fast_settings(), Arc::new(fetcher), None));

    let run = run_batches(
        Arc::clone(&analyzer),
        &urls(&["https://a.fr", "https://b.fr"]),
        &Filters::default(),
        5,
        Arc::new(FailingStore) as Arc<dyn ResultStore>,
        &CancellationToken::new(),
        None,
    )
    .await;

    assert_eq!(run.outcomes.len(), 2);
    assert_eq!(
        analyzer.stats().get_error_count(ErrorType::StoreWriteFailed),
        2
    );
    assert!(run.saved_ids.is_empty());
}
