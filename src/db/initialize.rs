use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Bring the schema of `conn` up to date.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let applied = run_pending_migrations(conn)?;
    if applied > 0 {
        debug!(applied, "schema migrated");
    }
    Ok(())
}
