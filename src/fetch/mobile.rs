//! Mobile-friendliness check against an external testing API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::MOBILE_FRIENDLY_ENDPOINT;
use crate::error_handling::MobileCheckError;

const MOBILE_FRIENDLY_VERDICT: &str = "MOBILE_FRIENDLY";

/// External mobile-friendliness checker.
#[async_trait]
pub trait MobileChecker: Send + Sync {
    /// `Ok(true)` when the service judges the page mobile friendly.
    async fn check(&self, url: &str) -> Result<bool, MobileCheckError>;
}

#[derive(Debug, Deserialize)]
struct MobileFriendlyResponse {
    #[serde(rename = "mobileFriendliness")]
    mobile_friendliness: Option<String>,
}

/// Search Console mobile-friendly test client.
#[derive(Clone)]
pub struct GoogleMobileChecker {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleMobileChecker {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: MOBILE_FRIENDLY_ENDPOINT.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Points the checker at another endpoint (mock servers, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl MobileChecker for GoogleMobileChecker {
    async fn check(&self, url: &str) -> Result<bool, MobileCheckError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MobileCheckError::Status(status.as_u16()));
        }

        let verdict: MobileFriendlyResponse = response.json().await?;
        Ok(verdict.mobile_friendliness.as_deref() == Some(MOBILE_FRIENDLY_VERDICT))
    }
}
