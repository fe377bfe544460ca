//! Versioned schema migrations, tracked through `PRAGMA user_version`.

use rusqlite::{Connection, Result};
use tracing::info;

/// Ordered list of (version, description, SQL). Never edit an applied entry;
/// append a new one instead.
const MIGRATIONS: &[(i32, &str, &str)] = &[(
    1,
    "create kv table",
    r#"
    CREATE TABLE IF NOT EXISTS kv (
        key         TEXT PRIMARY KEY,
        value       TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    "#,
)];

pub fn current_version(conn: &Connection) -> Result<i32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

pub fn latest_version() -> i32 {
    MIGRATIONS.last().map(|(v, _, _)| *v).unwrap_or(0)
}

/// Public entry point: run all pending migrations.
///
/// Returns the number of migrations applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    let mut version = current_version(conn)?;
    let mut applied = 0;

    for (next, description, sql) in MIGRATIONS {
        if *next <= version {
            continue;
        }

        conn.execute_batch(&format!(
            "BEGIN;\n{sql}\nPRAGMA user_version = {next};\nCOMMIT;"
        ))?;

        info!(version = *next, description = *description, "migration applied");
        version = *next;
        applied += 1;
    }

    Ok(applied)
}
