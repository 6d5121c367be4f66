//! The result-store seam used by the batch runner, and its SQLite implementation.

use std::path::Path;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::config::Filters;
use crate::error_handling::DatabaseError;
use crate::pipeline::AnalysisResult;

use super::models::{AnalysisSummary, Statistics, StoredAnalysis};
use super::{
    get_latest_by_url, init_db_pool_with_path, list_analyses, list_analyses_by_ids, query_history,
    query_statistics, run_migrations, save_analysis,
};

/// Where finished results go.
///
/// Called once per completed URL, concurrently from several workers, in no
/// particular order.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persists one result and returns its record id.
    async fn save(&self, result: &AnalysisResult) -> Result<i64, DatabaseError>;
}

/// SQLite-backed store over a connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the database at `path` and applies migrations.
    pub async fn open(path: &Path) -> Result<Self, DatabaseError> {
        let pool = init_db_pool_with_path(path).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Wraps an already migrated pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn history(
        &self,
        filters: &Filters,
        limit: usize,
    ) -> Result<Vec<AnalysisSummary>, DatabaseError> {
        query_history(&self.pool, filters, limit).await
    }

    pub async fn analyses(
        &self,
        filters: &Filters,
        limit: usize,
    ) -> Result<Vec<StoredAnalysis>, DatabaseError> {
        list_analyses(&self.pool, filters, limit).await
    }

    /// Exactly the records with these ids, newest first.
    pub async fn analyses_by_ids(&self, ids: &[i64]) -> Result<Vec<StoredAnalysis>, DatabaseError> {
        list_analyses_by_ids(&self.pool, ids).await
    }

    pub async fn latest_by_url(&self, url: &str) -> Result<Option<StoredAnalysis>, DatabaseError> {
        get_latest_by_url(&self.pool, url).await
    }

    pub async fn statistics(&self) -> Result<Statistics, DatabaseError> {
        query_statistics(&self.pool).await
    }

    /// Closes the pool, flushing WAL state.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ResultStore for SqliteStore {
    async fn save(&self, result: &AnalysisResult) -> Result<i64, DatabaseError> {
        save_analysis(&self.pool, result).await
    }
}
