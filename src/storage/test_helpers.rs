//! Shared test helpers for storage module tests.

use sqlx::SqlitePool;

use crate::classify::{Country, Sector};
use crate::pipeline::{AnalysisDetails, AnalysisResult};
use crate::signals::test_helpers::perfect_signals;
use crate::storage::run_migrations;

/// In-memory database pool with migrations applied.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Scored result with the given labels and score.
pub fn scored_result(url: &str, score: u8, country: Country, sector: Sector) -> AnalysisResult {
    let mut signals = perfect_signals();
    signals.country = country;
    signals.sector = sector;
    AnalysisResult {
        url: url.to_string(),
        score,
        issues: if score < 100 {
            vec!["No HTTPS".to_string()]
        } else {
            Vec::new()
        },
        details: AnalysisDetails::Signals(Box::new(signals)),
        country,
        sector,
    }
}
