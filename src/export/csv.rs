//! CSV report rendering.
//!
//! One row per analysis, flattened: the issue list is reduced to its length.

use anyhow::Result;
use chrono::SecondsFormat;
use csv::Writer;

use crate::storage::StoredAnalysis;

const HEADER: [&str; 6] = [
    "url",
    "score",
    "country",
    "sector",
    "issues_count",
    "created_at",
];

pub fn render_csv(analyses: &[StoredAnalysis]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for analysis in analyses {
        let result = &analysis.result;
        writer.write_record([
            result.url.clone(),
            result.score.to_string(),
            result.country.to_string(),
            result.sector.to_string(),
            result.issues.len().to_string(),
            analysis.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))
}
