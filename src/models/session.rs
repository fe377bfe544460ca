use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status stored inside an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Working,
    Break,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Working => "working",
            SessionStatus::Break => "break",
        }
    }
}

/// In-progress clock-in/break state, prior to being finalized into a WorkLog.
///
/// Instants are serialized as epoch milliseconds and the accumulated break as
/// a plain millisecond count, which is the shape mirrored to the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub status: SessionStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub break_start_time: Option<DateTime<Utc>>,
    pub accumulated_break_time: i64, // ms, completed breaks only
}

impl ActiveSession {
    pub fn started_at(now: DateTime<Utc>) -> Self {
        Self {
            status: SessionStatus::Working,
            start_time: now,
            break_start_time: None,
            accumulated_break_time: 0,
        }
    }

    /// Structural checks applied to any session read from a cache or remote.
    pub fn is_valid(&self) -> bool {
        if self.accumulated_break_time < 0 {
            return false;
        }
        match self.status {
            SessionStatus::Working => self.break_start_time.is_none(),
            SessionStatus::Break => self
                .break_start_time
                .is_some_and(|b| b >= self.start_time),
        }
    }

    /// Break time including the in-progress break, in milliseconds.
    pub fn break_ms_at(&self, now: DateTime<Utc>) -> i64 {
        let running = match (self.status, self.break_start_time) {
            (SessionStatus::Break, Some(b)) => (now - b).num_milliseconds().max(0),
            _ => 0,
        };
        self.accumulated_break_time + running
    }

    /// Elapsed time since clock-in minus all break time, in milliseconds.
    pub fn work_ms_at(&self, now: DateTime<Utc>) -> i64 {
        let total = (now - self.start_time).num_milliseconds();
        (total - self.break_ms_at(now)).max(0)
    }
}

/// Observable state of the session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No active session.
    Idle,
    Working,
    OnBreak,
}

impl SessionState {
    pub fn of(session: Option<&ActiveSession>) -> Self {
        match session.map(|s| s.status) {
            None => SessionState::Idle,
            Some(SessionStatus::Working) => SessionState::Working,
            Some(SessionStatus::Break) => SessionState::OnBreak,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "no session is active",
            SessionState::Working => "working",
            SessionState::OnBreak => "on break",
        };
        f.write_str(s)
    }
}
