//! HTTP fetching.
//!
//! The pipeline talks to the network only through two traits:
//! [`HttpFetcher`] for page GETs and [`MobileChecker`] for the external
//! mobile-friendliness test. The reqwest-backed implementations live here;
//! tests substitute their own.

mod mobile;
mod retry;
mod types;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::AnalyzerSettings;
use crate::error_handling::{FetchError, InitializationError};
use crate::initialization::init_client;

pub use mobile::{GoogleMobileChecker, MobileChecker};
pub use retry::fetch_with_retry;
pub use types::{FetchResult, HttpResponse};

/// HTTP GET collaborator.
///
/// Timeout and user agent are properties of the implementation, fixed at
/// construction.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// One GET attempt. Transport failures are errors; every HTTP status is
    /// a response.
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// [`HttpFetcher`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Builds a client with the settings' timeout and user agent.
    pub fn new(settings: &AnalyzerSettings) -> Result<Self, InitializationError> {
        Ok(Self::from_client(init_client(settings)?))
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect::<HashMap<_, _>>();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::UnreadableBody {
                status_code,
                source,
            })?;
        log::debug!("GET {url} -> {status_code} ({} bytes)", body.len());
        Ok(HttpResponse {
            status_code,
            body,
            headers,
        })
    }
}
