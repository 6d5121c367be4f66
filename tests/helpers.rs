// Shared fakes and fixtures for the integration tests.
//
// Not every test file uses every helper.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use web_radar::error_handling::{DatabaseError, FetchError};
use web_radar::fetch::{HttpFetcher, HttpResponse};
use web_radar::pipeline::AnalysisDetails;
use web_radar::signals::{
    CmsSignal, CopyrightSignal, H1Signal, ImageSignal, LinkSignal, MobileSignal, MobileSource,
    PerformanceSignal, SiteSignals, TextSignal,
};
use web_radar::{AnalysisResult, AnalyzerSettings, Country, ResultStore, Sector};

/// A page that passes every on-page check.
pub const GOOD_PAGE: &str = r#"<html><head>
<title>Acme Cloud Software - Tools for modern teams</title>
<meta name="description" content="Acme builds cloud software for modern teams: planning, tracking and shipping in one place. Start free today and bring your whole team along with you, no card.">
</head><body><h1>Acme</h1><img src="a.png" alt="A"><a href="/x">x</a></body></html>"#;

/// Signals that trigger no deduction.
pub fn perfect_signals() -> SiteSignals {
    SiteSignals {
        country: Country::International,
        sector: Sector::General,
        https: true,
        title: TextSignal::measure(Some("t".repeat(45)), 30, 60),
        meta_description: TextSignal::measure(Some("m".repeat(155)), 150, 160),
        h1: H1Signal {
            count: 1,
            contents: vec!["Heading".to_string()],
            optimal: true,
        },
        images: ImageSignal {
            total: 2,
            without_alt: 0,
            optimal: true,
        },
        links: LinkSignal::default(),
        page_size_bytes: 10_000,
        cms: CmsSignal::default(),
        performance: PerformanceSignal {
            load_time_seconds: Some(0.4),
            slow: false,
        },
        copyright: CopyrightSignal::default(),
        mobile: MobileSignal {
            mobile_friendly: true,
            source: MobileSource::Checked,
        },
    }
}

/// Scored result carrying the given labels, with one issue.
pub fn scored(url: &str, score: u8, country: Country, sector: Sector) -> AnalysisResult {
    let mut signals = perfect_signals();
    signals.country = country;
    signals.sector = sector;
    AnalysisResult {
        url: url.to_string(),
        score,
        issues: vec!["Missing <title> tag".to_string()],
        details: AnalysisDetails::Signals(Box::new(signals)),
        country,
        sector,
    }
}

/// Settings without retry delay, so failing fetches don't slow tests down.
pub fn fast_settings() -> AnalyzerSettings {
    AnalyzerSettings {
        timeout_seconds: 5,
        max_retries: 2,
        retry_delay_seconds: 0,
        ..AnalyzerSettings::default()
    }
}

/// Fetcher serving canned bodies.
///
/// Unknown URLs fail like a refused connection. URLs listed in `panics_on`
/// make the calling task panic. When `cancel_on_first_call` is set, the first
/// GET raises that token.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    panics_on: HashSet<String>,
    cancel_on_first_call: Option<CancellationToken>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn panicking_on(mut self, url: &str) -> Self {
        self.panics_on.insert(url.to_string());
        self
    }

    pub fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_first_call = Some(token);
        self
    }

    /// Distinct URLs requested so far.
    pub fn requested_urls(&self) -> HashSet<String> {
        self.calls.lock().unwrap().iter().cloned().collect()
    }
}

#[async_trait]
impl HttpFetcher for FakeFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        {
            let mut calls = self.calls.lock().unwrap();
            if calls.is_empty() {
                if let Some(token) = &self.cancel_on_first_call {
                    token.cancel();
                }
            }
            calls.push(url.to_string());
        }
        if self.panics_on.contains(url) {
            panic!("fetcher blew up on {url}");
        }
        // Let sibling tasks interleave
        tokio::task::yield_now().await;
        match self.pages.get(url) {
            Some(body) => Ok(HttpResponse {
                status_code: 200,
                body: body.clone(),
                headers: HashMap::new(),
            }),
            None => Err(FetchError::Other(format!("connection refused: {url}"))),
        }
    }
}

/// Store keeping results in memory.
#[derive(Default)]
pub struct RecordingStore {
    saved: Mutex<Vec<AnalysisResult>>,
}

impl RecordingStore {
    pub fn saved(&self) -> Vec<AnalysisResult> {
        self.saved.lock().unwrap().clone()
    }

    pub fn saved_urls(&self) -> HashSet<String> {
        self.saved().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl ResultStore for RecordingStore {
    async fn save(&self, result: &AnalysisResult) -> Result<i64, DatabaseError> {
        let mut saved = self.saved.lock().unwrap();
        saved.push(result.clone());
        Ok(saved.len() as i64)
    }
}

/// Store whose every write fails.
pub struct FailingStore;

#[async_trait]
impl ResultStore for FailingStore {
    async fn save(&self, _result: &AnalysisResult) -> Result<i64, DatabaseError> {
        Err(DatabaseError::FileCreationError("disk full".to_string()))
    }
}
