//! Per-URL analysis pipeline.
//!
//! [`Analyzer::process`] walks one URL through
//! validate → fetch → classify/filter → extract → score. Every branch ends in
//! a [`PipelineOutcome`]; nothing here returns an error or panics on bad input,
//! so one URL can never take its siblings down.

mod types;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::classify::{classify_page, Classification, Country, Sector};
use crate::config::{AnalyzerSettings, Filters};
use crate::error_handling::{ErrorType, InfoType, InitializationError, ProcessingStats};
use crate::fetch::{
    fetch_with_retry, FetchResult, GoogleMobileChecker, HttpFetcher, MobileChecker,
    ReqwestFetcher,
};
use crate::score::score;
use crate::signals::extract_signals;

pub use types::{
    AnalysisDetails, AnalysisResult, FilterKind, FilteredUrl, PipelineOutcome, PipelineState,
    ResultKind,
};

/// Longest URL accepted by validation.
const MAX_URL_LENGTH: usize = 2048;

/// Message carried by results for URLs that fail validation.
pub const INVALID_URL_MESSAGE: &str = "invalid URL";

/// Runs the pipeline for individual URLs.
///
/// Holds only immutable configuration and shared collaborators, so one
/// instance can serve any number of concurrent tasks behind an `Arc`.
pub struct Analyzer {
    settings: AnalyzerSettings,
    fetcher: Arc<dyn HttpFetcher>,
    mobile_checker: Option<Arc<dyn MobileChecker>>,
    stats: Arc<ProcessingStats>,
}

impl Analyzer {
    pub fn new(
        settings: AnalyzerSettings,
        fetcher: Arc<dyn HttpFetcher>,
        mobile_checker: Option<Arc<dyn MobileChecker>>,
    ) -> Self {
        Self {
            settings,
            fetcher,
            mobile_checker,
            stats: Arc::new(ProcessingStats::new()),
        }
    }

    /// Wires the reqwest fetcher, plus the mobile checker when an API key is
    /// configured.
    pub fn from_settings(settings: AnalyzerSettings) -> Result<Self, InitializationError> {
        let fetcher = ReqwestFetcher::new(&settings)?;
        let mobile_checker = settings.mobile_api_key.as_ref().map(|key| {
            Arc::new(GoogleMobileChecker::new(fetcher.client().clone(), key.clone()))
                as Arc<dyn MobileChecker>
        });
        if mobile_checker.is_none() {
            log::info!("No mobile API key configured, pages will be assumed mobile friendly");
        }
        Ok(Self::new(settings, Arc::new(fetcher), mobile_checker))
    }

    /// Shares an existing counter set instead of a fresh one.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Analyzes one URL.
    pub async fn process(&self, url: &str, filters: &Filters) -> PipelineOutcome {
        let url = url.trim();
        log::debug!("{url}: {} -> {}", PipelineState::Pending, PipelineState::Validating);
        if validate_url(url).is_none() {
            log::warn!("Rejecting invalid URL: {url}");
            self.stats.increment_error(ErrorType::InvalidUrl);
            return PipelineOutcome::Failed(AnalysisResult::failure(url, INVALID_URL_MESSAGE, None));
        }

        log::debug!("{url}: {} -> {}", PipelineState::Validating, PipelineState::Fetching);
        let fetched = fetch_with_retry(
            self.fetcher.as_ref(),
            url,
            self.settings.attempts(),
            Duration::from_secs(self.settings.retry_delay_seconds),
        )
        .await;

        if let Some(message) = &fetched.error {
            log::debug!("{url}: {} -> {}", PipelineState::Fetching, PipelineState::Failed);
            self.stats.increment_error(ErrorType::FetchFailed);
            return PipelineOutcome::Failed(AnalysisResult::failure(
                url,
                message.clone(),
                fetched.status_code,
            ));
        }

        let labels = classify_page(url, Some(&fetched.html));
        if let Some(excluded_by) = excluded_by(filters, labels.country, labels.sector) {
            log::debug!(
                "{url}: {} -> {} ({} filter; detected {} / {})",
                PipelineState::Fetching,
                PipelineState::Filtered,
                excluded_by,
                labels.country,
                labels.sector
            );
            self.stats.increment_info(InfoType::Filtered);
            return PipelineOutcome::Filtered(FilteredUrl {
                url: url.to_string(),
                country: labels.country,
                sector: labels.sector,
                excluded_by,
            });
        }

        log::debug!("{url}: {} -> {}", PipelineState::Fetching, PipelineState::Transforming);
        PipelineOutcome::Scored(self.transform(&fetched, labels).await)
    }

    async fn transform(
        &self,
        fetched: &FetchResult,
        labels: Classification,
    ) -> AnalysisResult {
        let signals = extract_signals(
            fetched,
            labels,
            self.fetcher.as_ref(),
            self.mobile_checker.as_deref(),
            &self.stats,
        )
        .await;
        let (score, issues) = score(&signals);
        log::debug!(
            "{}: {} -> {} (score {score}, {} issue(s))",
            fetched.url,
            PipelineState::Transforming,
            PipelineState::Scored,
            issues.len()
        );
        AnalysisResult {
            url: fetched.url.clone(),
            score,
            issues,
            country: signals.country,
            sector: signals.sector,
            details: AnalysisDetails::Signals(Box::new(signals)),
        }
    }
}

/// Parses `url`, requiring a scheme and a host.
pub fn validate_url(url: &str) -> Option<Url> {
    if url.is_empty() || url.len() > MAX_URL_LENGTH {
        return None;
    }
    let parsed = Url::parse(url).ok()?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() && !parsed.scheme().is_empty() => Some(parsed),
        _ => None,
    }
}

/// The first filter the labels fail, country before sector.
///
/// An unset filter accepts everything.
fn excluded_by(
    filters: &Filters,
    country: Country,
    sector: Sector,
) -> Option<FilterKind> {
    if filters.country.is_some_and(|wanted| wanted != country) {
        return Some(FilterKind::Country);
    }
    if filters.sector.is_some_and(|wanted| wanted != sector) {
        return Some(FilterKind::Sector);
    }
    None
}
