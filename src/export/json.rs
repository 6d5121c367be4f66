//! JSON report rendering.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::{Statistics, StoredAnalysis};

#[derive(Serialize)]
struct JsonReport<'a> {
    generation_date: DateTime<Utc>,
    statistics: &'a Statistics,
    analyses: &'a [StoredAnalysis],
}

pub fn render_json(analyses: &[StoredAnalysis], statistics: &Statistics) -> Result<Vec<u8>> {
    let report = JsonReport {
        generation_date: Utc::now(),
        statistics,
        analyses,
    };
    Ok(serde_json::to_vec_pretty(&report)?)
}
