//! Schema migrations, embedded from `migrations/` at compile time so the
//! binary does not depend on the source tree being present.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies every pending migration. Already applied ones are skipped, so
/// this is safe to call on each open.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DatabaseError> {
    MIGRATOR.run(pool).await?;
    log::debug!("Database schema up to date ({} migration(s))", MIGRATOR.iter().count());
    Ok(())
}
