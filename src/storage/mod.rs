// storage/mod.rs
// Database operations module

mod insert;
mod migrations;
mod models;
mod pool;
mod queries;
mod store;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use insert::{save_analysis, save_analysis_at};
pub use migrations::run_migrations;
pub use models::{AnalysisSummary, GroupStats, Statistics, StoredAnalysis};
pub use pool::init_db_pool_with_path;
pub use queries::{
    get_latest_by_url, list_analyses, list_analyses_by_ids, query_history, query_statistics,
};
pub use store::{ResultStore, SqliteStore};
