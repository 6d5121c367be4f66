//! Pipeline states and result records.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::classify::{Country, Sector};
use crate::signals::SiteSignals;

/// Per-URL state machine.
///
/// `Pending → Validating → Fetching → (Failed | Filtered | Transforming) → Scored`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PipelineState {
    Pending,
    Validating,
    Fetching,
    Failed,
    Filtered,
    Transforming,
    Scored,
}

/// Persisted kind of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Scored,
    Failed,
}

/// Either the signals that produced the score, or the failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisDetails {
    Signals(Box<SiteSignals>),
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },
}

/// Terminal record for one URL, handed to storage and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub url: String,
    /// Always within `[0, 100]`; 0 for failures
    pub score: u8,
    pub issues: Vec<String>,
    pub details: AnalysisDetails,
    pub country: Country,
    pub sector: Sector,
}

impl AnalysisResult {
    /// Failure record: score 0, unknown labels, one `Error:` issue.
    pub fn failure(url: &str, message: impl Into<String>, status_code: Option<u16>) -> Self {
        let message = message.into();
        Self {
            url: url.to_string(),
            score: 0,
            issues: vec![format!("Error: {message}")],
            details: AnalysisDetails::Error {
                message,
                status_code,
            },
            country: Country::Unknown,
            sector: Sector::Unknown,
        }
    }

    pub fn kind(&self) -> ResultKind {
        match self.details {
            AnalysisDetails::Signals(_) => ResultKind::Scored,
            AnalysisDetails::Error { .. } => ResultKind::Failed,
        }
    }

    pub fn signals(&self) -> Option<&SiteSignals> {
        match &self.details {
            AnalysisDetails::Signals(signals) => Some(signals),
            AnalysisDetails::Error { .. } => None,
        }
    }
}

/// Which filter excluded a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum FilterKind {
    Country,
    Sector,
}

/// A URL dropped by a country/sector filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredUrl {
    pub url: String,
    pub country: Country,
    pub sector: Sector,
    pub excluded_by: FilterKind,
}

/// How one URL's pipeline ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Scored(AnalysisResult),
    Failed(AnalysisResult),
    Filtered(FilteredUrl),
}

impl PipelineOutcome {
    pub fn state(&self) -> PipelineState {
        match self {
            PipelineOutcome::Scored(_) => PipelineState::Scored,
            PipelineOutcome::Failed(_) => PipelineState::Failed,
            PipelineOutcome::Filtered(_) => PipelineState::Filtered,
        }
    }

    /// The record to persist and report; `None` for filtered URLs.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            PipelineOutcome::Scored(r) | PipelineOutcome::Failed(r) => Some(r),
            PipelineOutcome::Filtered(_) => None,
        }
    }

    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            PipelineOutcome::Scored(r) | PipelineOutcome::Failed(r) => Some(r),
            PipelineOutcome::Filtered(_) => None,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            PipelineOutcome::Scored(r) | PipelineOutcome::Failed(r) => &r.url,
            PipelineOutcome::Filtered(f) => &f.url,
        }
    }
}
