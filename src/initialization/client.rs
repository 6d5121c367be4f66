//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::AnalyzerSettings;

/// Builds the shared `reqwest::Client` from the analyzer settings.
///
/// Timeout and user agent apply to every request made through the client,
/// including the timed re-fetch and the mobile check.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(settings: &AnalyzerSettings) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(settings.timeout_seconds.max(1)))
        .user_agent(settings.user_agent.clone())
        .build()
}
