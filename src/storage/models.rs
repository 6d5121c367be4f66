// storage/models.rs
// Rows read back from the `analyses` table

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{Country, Sector};
use crate::pipeline::{AnalysisResult, ResultKind};

/// One history row, without the JSON payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: i64,
    pub url: String,
    pub score: u8,
    pub country: Country,
    pub sector: Sector,
    pub outcome: ResultKind,
    pub issues_count: usize,
    pub created_at: DateTime<Utc>,
}

/// A full stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Count and mean score of one country or sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub label: String,
    pub count: i64,
    /// Mean over every row of the group, rounded to 2 decimals
    pub average_score: f64,
}

/// Aggregates over the whole table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_count: i64,
    /// Mean over scores > 0 only, rounded to 2 decimals
    pub average_score: f64,
    /// Largest group first; `Unknown` excluded
    pub by_country: Vec<GroupStats>,
    /// Largest group first; `unknown` excluded
    pub by_sector: Vec<GroupStats>,
}

/// Milliseconds since the epoch to UTC; out-of-range values clamp to the epoch.
pub(crate) fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
