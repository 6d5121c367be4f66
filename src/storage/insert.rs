//! Database insert operations.
//!
//! All inserts use parameterized queries; the issue list and the details are
//! stored as JSON text.

use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::pipeline::AnalysisResult;

/// Inserts one analysis and returns its row id.
///
/// The row is stamped with the current time in milliseconds.
pub async fn save_analysis(
    pool: &SqlitePool,
    result: &AnalysisResult,
) -> Result<i64, DatabaseError> {
    save_analysis_at(pool, result, chrono::Utc::now().timestamp_millis()).await
}

/// Inserts one analysis with an explicit creation time.
pub async fn save_analysis_at(
    pool: &SqlitePool,
    result: &AnalysisResult,
    created_at_ms: i64,
) -> Result<i64, DatabaseError> {
    let issues = serde_json::to_string(&result.issues)?;
    let details = serde_json::to_string(&result.details)?;

    let row = sqlx::query(
        "INSERT INTO analyses (url, score, country, sector, outcome, issues, details, created_at_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(&result.url)
    .bind(i64::from(result.score))
    .bind(result.country.as_ref())
    .bind(result.sector.as_ref())
    .bind(result.kind().as_ref())
    .bind(issues)
    .bind(details)
    .bind(created_at_ms)
    .fetch_one(pool)
    .await?;

    let id: i64 = row.get("id");
    log::debug!("Saved analysis {} for {}", id, result.url);
    Ok(id)
}
