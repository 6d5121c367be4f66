//! Database connection pool management.
//!
//! The SQLite pool is opened with:
//! - WAL mode so concurrent workers can write while reports read
//! - A busy timeout instead of immediate `SQLITE_BUSY` failures
//! - Automatic database file (and parent directory) creation

use std::path::Path;
use std::time::Duration;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

const MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the database at `db_path`.
///
/// Migrations are not run here; see [`super::run_migrations`].
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<SqlitePool, DatabaseError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            error!("Failed to create database directory {}: {e}", parent.display());
            DatabaseError::FileCreationError(e.to_string())
        })?;
    }

    let existed = db_path.exists();
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database {}: {e}", db_path.display());
            DatabaseError::SqlError(e)
        })?;

    if existed {
        info!("Opened database {}", db_path.display());
    } else {
        info!("Created database {}", db_path.display());
    }
    Ok(pool)
}
