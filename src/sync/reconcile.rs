//! Local/remote reconciliation for the session and the log collection.
//!
//! Once a remote binding exists the remote copy is authoritative: a present
//! value overwrites the local cache and an explicit absence clears it. When
//! the remote cannot be read the local cache is used unchanged. Writes are
//! local first; the remote is updated by background tasks whose failures are
//! only logged.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::store::{LOGS_KEY, LocalStore, SESSION_KEY};
use crate::errors::{AppError, AppResult};
use crate::models::session::ActiveSession;
use crate::models::work_log::WorkLog;
use crate::sync::remote::{self, RemoteStore};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Outcome of reading one resource from the remote store.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteRead<T> {
    /// A valid value is stored remotely.
    Present(T),
    /// The remote explicitly holds nothing.
    Cleared,
    /// Transport failure, timeout or a payload that fails validation.
    Unavailable,
}

/// Where the reconciled value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Local,
    Remote,
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<T> {
    pub value: Option<T>,
    pub source: Source,
}

/// Pure reconciliation policy shared by both resources.
pub fn reconcile<T>(local: Option<T>, remote: RemoteRead<T>) -> Reconciled<T> {
    match remote {
        RemoteRead::Present(v) => Reconciled {
            value: Some(v),
            source: Source::Remote,
        },
        RemoteRead::Cleared => Reconciled {
            value: None,
            source: Source::Cleared,
        },
        RemoteRead::Unavailable => Reconciled {
            value: local,
            source: Source::Local,
        },
    }
}

/// Whether a polled remote session should replace the local one.
/// Only presence, status and accumulated break time are compared.
pub fn should_adopt_remote(local: Option<&ActiveSession>, remote: Option<&ActiveSession>) -> bool {
    match (local, remote) {
        (None, None) => false,
        (Some(l), Some(r)) => {
            l.status != r.status || l.accumulated_break_time != r.accumulated_break_time
        }
        _ => true,
    }
}

/// Strictly parse a remote payload into a session.
pub fn parse_session(raw: Option<Value>) -> RemoteRead<ActiveSession> {
    match parse::<ActiveSession>(raw, SESSION_KEY) {
        RemoteRead::Present(s) if !s.is_valid() => {
            warn!(key = SESSION_KEY, "remote session fails validation, ignoring");
            RemoteRead::Unavailable
        }
        other => other,
    }
}

/// Strictly parse a remote payload into the log collection. One bad entry
/// invalidates the whole payload; an empty array counts as cleared.
pub fn parse_logs(raw: Option<Value>) -> RemoteRead<Vec<WorkLog>> {
    match parse::<Vec<WorkLog>>(raw, LOGS_KEY) {
        RemoteRead::Present(v) if v.is_empty() => RemoteRead::Cleared,
        RemoteRead::Present(v) if !v.iter().all(WorkLog::is_consistent) => {
            warn!(key = LOGS_KEY, "remote logs fail validation, ignoring");
            RemoteRead::Unavailable
        }
        other => other,
    }
}

fn parse<T: DeserializeOwned>(raw: Option<Value>, key: &str) -> RemoteRead<T> {
    match raw {
        None | Some(Value::Null) => RemoteRead::Cleared,
        Some(v) => match serde_json::from_value(v) {
            Ok(t) => RemoteRead::Present(t),
            Err(e) => {
                warn!(key, error = %e, "malformed remote payload, ignoring");
                RemoteRead::Unavailable
            }
        },
    }
}

pub struct SyncReconciler {
    remote: Option<Arc<dyn RemoteStore>>,
    namespace: String,
    timeout: Duration,
    poll_interval: Duration,
    pending: TaskTracker,
}

impl SyncReconciler {
    /// No remote binding: the local cache is the only source of truth.
    pub fn local_only() -> Self {
        Self {
            remote: None,
            namespace: String::new(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            pending: TaskTracker::new(),
        }
    }

    pub fn new(
        remote: Arc<dyn RemoteStore>,
        namespace: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            remote: Some(remote),
            namespace: namespace.to_string(),
            timeout,
            poll_interval,
            pending: TaskTracker::new(),
        }
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        match &cfg.remote {
            None => Ok(Self::local_only()),
            Some(rc) => {
                let store: Arc<dyn RemoteStore> = Arc::from(remote::from_config(rc)?);
                debug!(remote = %store.describe(), namespace = %rc.namespace, "remote binding configured");
                Ok(Self::new(
                    store,
                    &rc.namespace,
                    Duration::from_secs(rc.timeout_secs.max(1)),
                    Duration::from_secs(rc.poll_interval_secs.max(1)),
                ))
            }
        }
    }

    pub fn is_bound(&self) -> bool {
        self.remote.is_some()
    }

    pub fn describe(&self) -> Option<String> {
        self.remote.as_ref().map(|r| r.describe())
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    fn key(&self, resource: &str) -> String {
        format!("{}.{}", self.namespace, resource)
    }

    async fn fetch_raw(&self, resource: &str) -> Option<AppResult<Option<Value>>> {
        let remote = self.remote.as_ref()?;
        let key = self.key(resource);
        let res = match tokio::time::timeout(self.timeout, remote.fetch(&key)).await {
            Ok(r) => r,
            Err(_) => Err(AppError::RemoteUnavailable(format!(
                "fetch of '{key}' timed out after {:?}",
                self.timeout
            ))),
        };
        Some(res)
    }

    /// Read the remote session. `None` when no remote is bound.
    pub async fn fetch_session(&self) -> Option<RemoteRead<ActiveSession>> {
        Some(match self.fetch_raw(SESSION_KEY).await? {
            Ok(raw) => parse_session(raw),
            Err(e) => {
                warn!(error = %e, "remote session read failed");
                RemoteRead::Unavailable
            }
        })
    }

    /// Read the remote log collection. `None` when no remote is bound.
    pub async fn fetch_logs(&self) -> Option<RemoteRead<Vec<WorkLog>>> {
        Some(match self.fetch_raw(LOGS_KEY).await? {
            Ok(raw) => parse_logs(raw),
            Err(e) => {
                warn!(error = %e, "remote logs read failed");
                RemoteRead::Unavailable
            }
        })
    }

    /// Load the active session, letting the remote override the local cache.
    pub async fn load_session(&self, store: &LocalStore) -> AppResult<Option<ActiveSession>> {
        let local = store.load_session()?;
        let Some(remote) = self.fetch_session().await else {
            return Ok(local);
        };

        let r = reconcile(local.clone(), remote);
        if r.source != Source::Local && r.value != local {
            info!(source = ?r.source, "local session replaced by remote state");
            store.save_session(r.value.as_ref())?;
        }
        Ok(r.value)
    }

    /// Load the log collection, letting the remote override the local cache.
    pub async fn load_logs(&self, store: &LocalStore) -> AppResult<Vec<WorkLog>> {
        let local = store.load_logs()?;
        let Some(remote) = self.fetch_logs().await else {
            return Ok(local);
        };

        let local = (!local.is_empty()).then_some(local);
        let r = reconcile(local.clone(), remote);
        if r.source != Source::Local && r.value != local {
            info!(source = ?r.source, "local logs replaced by remote state");
            store.save_logs(r.value.as_deref().unwrap_or_default())?;
        }
        Ok(r.value.unwrap_or_default())
    }

    /// Best-effort background push of the session (absence is pushed as null).
    pub fn mirror_session(&self, session: Option<&ActiveSession>) {
        match serde_json::to_value(session) {
            Ok(v) => self.mirror(SESSION_KEY, v),
            Err(e) => warn!(error = %e, "cannot serialize session for remote"),
        }
    }

    /// Best-effort background push of the whole log collection.
    pub fn mirror_logs(&self, logs: &[WorkLog]) {
        match serde_json::to_value(logs) {
            Ok(v) => self.mirror(LOGS_KEY, v),
            Err(e) => warn!(error = %e, "cannot serialize logs for remote"),
        }
    }

    fn mirror(&self, resource: &'static str, value: Value) {
        let Some(remote) = self.remote.clone() else {
            return;
        };
        let key = self.key(resource);
        self.pending.spawn(async move {
            match remote.push(&key, &value).await {
                Ok(()) => debug!(key = %key, "mirrored to remote"),
                Err(e) => warn!(key = %key, error = %e, "remote mirror failed; local copy kept"),
            }
        });
    }

    /// Push both resources now and report failures to the caller.
    pub async fn push_all(
        &self,
        session: Option<&ActiveSession>,
        logs: &[WorkLog],
    ) -> AppResult<()> {
        let Some(remote) = self.remote.as_ref() else {
            return Err(AppError::Config("no remote store configured".into()));
        };
        remote
            .push(&self.key(SESSION_KEY), &serde_json::to_value(session)?)
            .await?;
        remote
            .push(&self.key(LOGS_KEY), &serde_json::to_value(logs)?)
            .await?;
        Ok(())
    }

    /// Wait for outstanding background pushes, bounded by the read timeout.
    pub async fn flush(&self) {
        self.pending.close();
        if tokio::time::timeout(self.timeout, self.pending.wait())
            .await
            .is_err()
        {
            warn!(
                pending = self.pending.len(),
                "remote mirror still running at exit; giving up"
            );
        }
        self.pending.reopen();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionStatus;
    use chrono::DateTime;
    use serde_json::json;

    fn session(status: SessionStatus, break_ms: i64) -> ActiveSession {
        let start = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
        ActiveSession {
            status,
            start_time: start,
            break_start_time: (status == SessionStatus::Break)
                .then(|| start + chrono::Duration::minutes(30)),
            accumulated_break_time: break_ms,
        }
    }

    #[test]
    fn remote_present_wins_over_absent_local() {
        let remote = session(SessionStatus::Working, 0);
        let r = reconcile(None, RemoteRead::Present(remote.clone()));
        assert_eq!(r.value, Some(remote));
        assert_eq!(r.source, Source::Remote);
    }

    #[test]
    fn remote_cleared_clears_local() {
        let local = session(SessionStatus::Working, 0);
        let r = reconcile(Some(local), RemoteRead::Cleared);
        assert_eq!(r.value, None);
        assert_eq!(r.source, Source::Cleared);
    }

    #[test]
    fn unavailable_remote_keeps_local() {
        let local = session(SessionStatus::Break, 60_000);
        let r = reconcile(Some(local.clone()), RemoteRead::Unavailable);
        assert_eq!(r.value, Some(local));
        assert_eq!(r.source, Source::Local);
    }

    #[test]
    fn adopt_only_on_status_or_break_change() {
        let a = session(SessionStatus::Working, 0);
        let mut same = a.clone();
        same.start_time += chrono::Duration::seconds(1);
        assert!(!should_adopt_remote(Some(&a), Some(&same)));
        assert!(should_adopt_remote(
            Some(&a),
            Some(&session(SessionStatus::Break, 0))
        ));
        assert!(should_adopt_remote(
            Some(&a),
            Some(&session(SessionStatus::Working, 5_000))
        ));
        assert!(should_adopt_remote(Some(&a), None));
        assert!(should_adopt_remote(None, Some(&a)));
        assert!(!should_adopt_remote(None, None));
    }

    #[test]
    fn payload_missing_fields_is_not_trusted() {
        let raw = json!({ "status": "working", "startTime": 1_750_000_000_000_i64 });
        assert_eq!(parse_session(Some(raw)), RemoteRead::Unavailable);
        assert_eq!(parse_session(Some(Value::Null)), RemoteRead::Cleared);
        assert_eq!(parse_session(None), RemoteRead::Cleared);
    }

    #[test]
    fn break_status_without_break_start_is_rejected() {
        let raw = json!({
            "status": "break",
            "startTime": 1_750_000_000_000_i64,
            "breakStartTime": null,
            "accumulatedBreakTime": 0
        });
        assert_eq!(parse_session(Some(raw)), RemoteRead::Unavailable);
    }

    #[test]
    fn empty_log_array_counts_as_cleared() {
        assert_eq!(parse_logs(Some(json!([]))), RemoteRead::Cleared);
        assert_eq!(
            parse_logs(Some(json!([{ "id": "only-an-id" }]))),
            RemoteRead::Unavailable
        );
    }
}
