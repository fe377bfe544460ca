//! Local cache of the two synced resources, kept as JSON documents in the
//! `kv` table. Anything that fails to parse is treated as absent.

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::session::ActiveSession;
use crate::models::work_log::WorkLog;

pub const LOGS_KEY: &str = "logs";
pub const SESSION_KEY: &str = "session";

pub struct LocalStore {
    pool: DbPool,
}

impl LocalStore {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Run `func` against the underlying connection.
    pub fn with_conn<F, T>(&self, func: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        func(&self.pool.conn)
    }

    pub fn load_logs(&self) -> AppResult<Vec<WorkLog>> {
        let logs: Option<Vec<WorkLog>> = self.read_json(LOGS_KEY)?;
        match logs {
            Some(v) if v.iter().all(WorkLog::is_consistent) => Ok(v),
            Some(_) => {
                warn!(key = LOGS_KEY, "cached logs fail validation, treating as empty");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn save_logs(&self, logs: &[WorkLog]) -> AppResult<()> {
        self.write_json(LOGS_KEY, logs)
    }

    pub fn load_session(&self) -> AppResult<Option<ActiveSession>> {
        let session: Option<ActiveSession> = self.read_json(SESSION_KEY)?;
        Ok(session.filter(|s| {
            let ok = s.is_valid();
            if !ok {
                warn!(key = SESSION_KEY, "cached session fails validation, treating as absent");
            }
            ok
        }))
    }

    pub fn save_session(&self, session: Option<&ActiveSession>) -> AppResult<()> {
        match session {
            Some(s) => self.write_json(SESSION_KEY, s),
            None => self.delete(SESSION_KEY),
        }
    }

    /// Remove the entry with `id` (an unambiguous id prefix is accepted).
    /// Returns the removed entry and the remaining collection.
    pub fn delete_log(&self, id: &str) -> AppResult<(WorkLog, Vec<WorkLog>)> {
        let mut logs = self.load_logs()?;
        let matches: Vec<usize> = logs
            .iter()
            .enumerate()
            .filter(|(_, l)| l.id == id || (id.len() >= 4 && l.id.starts_with(id)))
            .map(|(i, _)| i)
            .collect();

        let idx = match matches.as_slice() {
            [single] => *single,
            _ => return Err(AppError::LogNotFound(id.to_string())),
        };

        let removed = logs.remove(idx);
        self.save_logs(&logs)?;
        Ok((removed, logs))
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let raw: Option<String> = self
            .pool
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(raw) = raw else {
            debug!(key, "no cached value");
            return Ok(None);
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(v) => Ok(v),
            Err(e) => {
                warn!(key, error = %e, "malformed cached JSON, treating as absent");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.pool.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, json, Local::now().to_rfc3339()],
        )?;
        debug!(key, bytes = json.len(), "cached value written");
        Ok(())
    }

    fn delete(&self, key: &str) -> AppResult<()> {
        self.pool
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        debug!(key, "cached value removed");
        Ok(())
    }

    #[cfg(test)]
    fn write_raw(&self, key: &str, raw: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, raw, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn session_round_trips_and_clears() {
        let store = LocalStore::in_memory().unwrap();
        assert!(store.load_session().unwrap().is_none());

        let s = ActiveSession::started_at(DateTime::from_timestamp_millis(1_750_000_000_123).unwrap());
        store.save_session(Some(&s)).unwrap();
        assert_eq!(store.load_session().unwrap(), Some(s));

        store.save_session(None).unwrap();
        assert!(store.load_session().unwrap().is_none());
    }

    #[test]
    fn corrupt_cache_reads_as_absent() {
        let store = LocalStore::in_memory().unwrap();
        store.write_raw(SESSION_KEY, "{not json").unwrap();
        store.write_raw(LOGS_KEY, r#"[{"id":"x"}]"#).unwrap();

        assert!(store.load_session().unwrap().is_none());
        assert!(store.load_logs().unwrap().is_empty());
    }

    #[test]
    fn session_missing_required_field_is_absent() {
        let store = LocalStore::in_memory().unwrap();
        store
            .write_raw(SESSION_KEY, r#"{"status":"working","startTime":1718000000000}"#)
            .unwrap();
        assert!(store.load_session().unwrap().is_none());
    }
}
