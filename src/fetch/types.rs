//! Fetch result types.

use std::collections::HashMap;

/// One HTTP response as seen by the pipeline.
///
/// Any status code is a response, including 4xx/5xx.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    /// Header names lower-cased; non-UTF-8 values are dropped
    pub headers: HashMap<String, String>,
}

/// Outcome of fetching one URL, after retries.
///
/// A result with `error` set never yields signals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResult {
    pub url: String,
    /// Raw body text; empty on failure
    pub html: String,
    pub status_code: Option<u16>,
    pub headers: HashMap<String, String>,
    /// Message of the last transport failure
    pub error: Option<String>,
    /// Attempts made, including the first
    pub attempts: u32,
}

impl FetchResult {
    pub fn success(url: &str, response: HttpResponse, attempts: u32) -> Self {
        Self {
            url: url.to_string(),
            html: response.body,
            status_code: Some(response.status_code),
            headers: response.headers,
            error: None,
            attempts,
        }
    }

    pub fn failure(url: &str, message: String, status_code: Option<u16>, attempts: u32) -> Self {
        Self {
            url: url.to_string(),
            error: Some(message),
            status_code,
            attempts,
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
