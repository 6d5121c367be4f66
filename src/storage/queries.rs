//! Read queries over the `analyses` table.
//!
//! Every listing is most-recent-first, ties broken by descending id so rows
//! inserted within the same millisecond still come back newest first.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::classify::{Country, Sector};
use crate::config::Filters;
use crate::error_handling::DatabaseError;
use crate::pipeline::{AnalysisResult, ResultKind};
use crate::utils::round2;

use super::models::{
    millis_to_datetime, AnalysisSummary, GroupStats, Statistics, StoredAnalysis,
};

const FULL_COLUMNS: &str =
    "SELECT id, url, score, country, sector, outcome, issues, details, created_at_ms FROM analyses";

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filters: &Filters) {
    builder.push(" WHERE 1=1");
    if let Some(country) = filters.country {
        builder.push(" AND country = ");
        builder.push_bind(country.as_ref().to_string());
    }
    if let Some(sector) = filters.sector {
        builder.push(" AND sector = ");
        builder.push_bind(sector.as_ref().to_string());
    }
}

fn push_order_and_limit(builder: &mut QueryBuilder<'_, Sqlite>, limit: usize) {
    builder.push(" ORDER BY created_at_ms DESC, id DESC LIMIT ");
    builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
}

/// Stored labels are display strings; anything unrecognised reads back as unknown.
fn parse_country(raw: &str) -> Country {
    Country::from_str(raw).unwrap_or(Country::Unknown)
}

fn parse_sector(raw: &str) -> Sector {
    Sector::from_str(raw).unwrap_or(Sector::Unknown)
}

fn score_from_row(row: &SqliteRow) -> u8 {
    row.get::<i64, _>("score").clamp(0, 100) as u8
}

fn stored_from_row(row: &SqliteRow) -> Result<StoredAnalysis, DatabaseError> {
    let issues: Vec<String> = serde_json::from_str(row.get::<&str, _>("issues"))?;
    let details = serde_json::from_str(row.get::<&str, _>("details"))?;
    Ok(StoredAnalysis {
        id: row.get("id"),
        created_at: millis_to_datetime(row.get("created_at_ms")),
        result: AnalysisResult {
            url: row.get("url"),
            score: score_from_row(row),
            issues,
            details,
            country: parse_country(row.get("country")),
            sector: parse_sector(row.get("sector")),
        },
    })
}

/// Summaries matching `filters`, newest first, at most `limit` rows.
pub async fn query_history(
    pool: &SqlitePool,
    filters: &Filters,
    limit: usize,
) -> Result<Vec<AnalysisSummary>, DatabaseError> {
    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT id, url, score, country, sector, outcome, json_array_length(issues) AS issues_count, created_at_ms FROM analyses",
    );
    push_filters(&mut builder, filters);
    push_order_and_limit(&mut builder, limit);

    let rows = builder.build().fetch_all(pool).await?;
    Ok(rows
        .iter()
        .map(|row| AnalysisSummary {
            id: row.get("id"),
            url: row.get("url"),
            score: score_from_row(row),
            country: parse_country(row.get("country")),
            sector: parse_sector(row.get("sector")),
            outcome: ResultKind::from_str(row.get("outcome")).unwrap_or(ResultKind::Failed),
            issues_count: row.get::<i64, _>("issues_count").max(0) as usize,
            created_at: millis_to_datetime(row.get("created_at_ms")),
        })
        .collect())
}

/// Full records matching `filters`, newest first, at most `limit` rows.
pub async fn list_analyses(
    pool: &SqlitePool,
    filters: &Filters,
    limit: usize,
) -> Result<Vec<StoredAnalysis>, DatabaseError> {
    let mut builder = QueryBuilder::<Sqlite>::new(FULL_COLUMNS);
    push_filters(&mut builder, filters);
    push_order_and_limit(&mut builder, limit);

    let rows = builder.build().fetch_all(pool).await?;
    rows.iter().map(stored_from_row).collect()
}

/// Bound parameters per `IN (...)` query, well under SQLite's variable limit.
pub(crate) const IDS_PER_QUERY: usize = 500;

/// Full records with the given ids, newest first. Unknown ids are skipped.
pub async fn list_analyses_by_ids(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<Vec<StoredAnalysis>, DatabaseError> {
    let mut analyses = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(IDS_PER_QUERY) {
        let mut builder = QueryBuilder::<Sqlite>::new(FULL_COLUMNS);
        builder.push(" WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in chunk {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows = builder.build().fetch_all(pool).await?;
        for row in &rows {
            analyses.push(stored_from_row(row)?);
        }
    }
    analyses.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    Ok(analyses)
}

/// Latest stored analysis of exactly `url`.
pub async fn get_latest_by_url(
    pool: &SqlitePool,
    url: &str,
) -> Result<Option<StoredAnalysis>, DatabaseError> {
    let row = sqlx::query(&format!(
        "{FULL_COLUMNS} WHERE url = ? ORDER BY created_at_ms DESC, id DESC LIMIT 1"
    ))
    .bind(url)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(stored_from_row).transpose()
}

async fn group_stats(
    pool: &SqlitePool,
    column: &str,
    excluded: &str,
) -> Result<Vec<GroupStats>, DatabaseError> {
    let rows = sqlx::query(&format!(
        "SELECT {column} AS label, COUNT(*) AS count, AVG(score) AS avg_score
         FROM analyses
         WHERE {column} != ?
         GROUP BY {column}
         ORDER BY count DESC, label ASC"
    ))
    .bind(excluded)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| GroupStats {
            label: row.get("label"),
            count: row.get("count"),
            average_score: round2(row.get::<Option<f64>, _>("avg_score").unwrap_or(0.0)),
        })
        .collect())
}

/// Totals, mean of non-zero scores, and per-country/per-sector groups.
pub async fn query_statistics(pool: &SqlitePool) -> Result<Statistics, DatabaseError> {
    let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM analyses")
        .fetch_one(pool)
        .await?;
    let average_score: Option<f64> =
        sqlx::query_scalar("SELECT AVG(score) FROM analyses WHERE score > 0")
            .fetch_one(pool)
            .await?;

    Ok(Statistics {
        total_count,
        average_score: round2(average_score.unwrap_or(0.0)),
        by_country: group_stats(pool, "country", Country::Unknown.as_ref()).await?,
        by_sector: group_stats(pool, "sector", Sector::Unknown.as_ref()).await?,
    })
}
