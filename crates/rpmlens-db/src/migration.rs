use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

use crate::error::{DbError, Result};

pub const CONTENT_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies every pending content store migration.
///
/// Returns the number of migrations that were run.
pub fn apply_migrations(conn: &mut SqliteConnection) -> Result<usize> {
    let applied = conn
        .run_pending_migrations(CONTENT_MIGRATIONS)
        .map_err(|e| DbError::Migration(e.to_string()))?;

    for version in &applied {
        debug!(version = %version, "applied migration");
    }

    Ok(applied.len())
}

/// Returns whether the store still has migrations to run.
pub fn has_pending_migrations(conn: &mut SqliteConnection) -> Result<bool> {
    conn.has_pending_migration(CONTENT_MIGRATIONS)
        .map_err(|e| DbError::Migration(e.to_string()))
}
