//! Report types and options.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::{Filters, GOOD_SCORE_THRESHOLD, PRIORITY_SCORE_THRESHOLD};
use crate::storage::StoredAnalysis;

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Self-contained HTML page
    Html,
    /// One row per analysis
    Csv,
    /// Pretty JSON with statistics and full records
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// Which stored analyses go into a report, and where it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub output: PathBuf,
    pub format: ReportFormat,
    pub filters: Filters,
    /// Only scored results below the priority threshold, lowest score first
    pub priority_only: bool,
    pub limit: usize,
}

/// Width of one histogram bucket, in score points.
pub const HISTOGRAM_BUCKET_WIDTH: u8 = 10;
const HISTOGRAM_BUCKETS: usize = 10;

/// Score histogram and band counts over the analyses of one report.
///
/// Failures count with their score of 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreDistribution {
    /// `buckets[i]` covers `[10*i, 10*i + 9]`; the last one also takes 100
    pub buckets: [usize; HISTOGRAM_BUCKETS],
    /// Score ≥ 80
    pub excellent: usize,
    /// 60 ≤ score < 80
    pub good: usize,
    /// Score < 60
    pub poor: usize,
}

impl ScoreDistribution {
    pub fn from_analyses(analyses: &[StoredAnalysis]) -> Self {
        let mut distribution = Self::default();
        for analysis in analyses {
            let score = analysis.result.score;
            let bucket = usize::from(score / HISTOGRAM_BUCKET_WIDTH).min(HISTOGRAM_BUCKETS - 1);
            distribution.buckets[bucket] += 1;
            if score >= GOOD_SCORE_THRESHOLD {
                distribution.excellent += 1;
            } else if score >= PRIORITY_SCORE_THRESHOLD {
                distribution.good += 1;
            } else {
                distribution.poor += 1;
            }
        }
        distribution
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }

    /// `(label, count)` per bucket, lowest scores first.
    pub fn labeled_buckets(&self) -> impl Iterator<Item = (String, usize)> + '_ {
        self.buckets.iter().enumerate().map(|(i, &count)| {
            let low = i * usize::from(HISTOGRAM_BUCKET_WIDTH);
            let high = if i == HISTOGRAM_BUCKETS - 1 {
                100
            } else {
                low + usize::from(HISTOGRAM_BUCKET_WIDTH) - 1
            };
            (format!("{low}-{high}"), count)
        })
    }
}
