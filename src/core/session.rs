//! Clock-in / break / clock-out state machine.
//!
//! The machine owns the single optional [`ActiveSession`] value. Callers load
//! it, apply one transition, then persist [`SessionMachine::session`] again.
//! Every transition that is not allowed from the current state returns
//! [`AppError::InvalidTransition`] and leaves the session untouched.

use chrono::{DateTime, Local, Utc};

use crate::core::duration::{ms_to_minutes, round_to_billing_unit};
use crate::core::pay::{compute_breakdown, validate_rate};
use crate::errors::{AppError, AppResult};
use crate::models::session::{ActiveSession, SessionState, SessionStatus};
use crate::models::work_log::{TIMER_NOTE, WorkLog};

/// Result of a clock-out attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockOutOutcome {
    /// Entry finalized; the session has been cleared.
    Finalized(WorkLog),
    /// Billable minutes are zero. The session is kept until the caller
    /// confirms; `draft` is what would be saved.
    NeedsConfirmation { draft: WorkLog, raw_minutes: i64 },
}

#[derive(Debug, Clone)]
pub struct SessionMachine {
    session: Option<ActiveSession>,
    billing_unit: i64,
}

impl SessionMachine {
    pub fn new(session: Option<ActiveSession>, billing_unit: i64) -> Self {
        Self {
            session,
            billing_unit,
        }
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    pub fn billing_unit(&self) -> i64 {
        self.billing_unit
    }

    pub fn state(&self) -> SessionState {
        SessionState::of(self.session.as_ref())
    }

    pub fn clock_in(&mut self, now: DateTime<Utc>) -> AppResult<&ActiveSession> {
        if self.session.is_some() {
            return Err(self.rejected("clock in"));
        }
        Ok(self.session.insert(ActiveSession::started_at(now)))
    }

    pub fn start_break(&mut self, now: DateTime<Utc>) -> AppResult<&ActiveSession> {
        let state = self.state();
        match self.session.as_mut() {
            Some(s) if s.status == SessionStatus::Working => {
                s.status = SessionStatus::Break;
                s.break_start_time = Some(now);
                Ok(s)
            }
            _ => Err(AppError::InvalidTransition {
                action: "start a break",
                state,
            }),
        }
    }

    pub fn end_break(&mut self, now: DateTime<Utc>) -> AppResult<&ActiveSession> {
        let state = self.state();
        match self.session.as_mut() {
            Some(s) if s.status == SessionStatus::Break => {
                fold_break(s, now);
                Ok(s)
            }
            _ => Err(AppError::InvalidTransition {
                action: "end a break",
                state,
            }),
        }
    }

    /// Finalize the session into a [`WorkLog`] priced at `hourly_rate`.
    ///
    /// A break still running is closed at `now` first. When the billable
    /// minutes round down to zero and `confirm_zero` is false, nothing changes
    /// and [`ClockOutOutcome::NeedsConfirmation`] is returned.
    pub fn clock_out(
        &mut self,
        now: DateTime<Utc>,
        hourly_rate: f64,
        confirm_zero: bool,
    ) -> AppResult<ClockOutOutcome> {
        let rate = validate_rate(hourly_rate)?;
        let Some(current) = self.session.as_ref() else {
            return Err(self.rejected("clock out"));
        };

        let mut closing = current.clone();
        if closing.status == SessionStatus::Break {
            fold_break(&mut closing, now);
        }

        let total_ms = (now - closing.start_time).num_milliseconds();
        let work_ms = total_ms - closing.accumulated_break_time;
        let raw_minutes = ms_to_minutes(work_ms);
        let break_minutes = ms_to_minutes(closing.accumulated_break_time);
        let actual_minutes = round_to_billing_unit(raw_minutes, self.billing_unit);

        let start_local = closing.start_time.with_timezone(&Local);
        let end_local = now.with_timezone(&Local);
        let log = WorkLog::new(
            start_local.date_naive(),
            start_local.format("%H:%M").to_string(),
            end_local.format("%H:%M").to_string(),
            break_minutes,
            rate,
            actual_minutes,
            compute_breakdown(actual_minutes, rate),
            Some(TIMER_NOTE.to_string()),
        );

        if actual_minutes <= 0 && !confirm_zero {
            return Ok(ClockOutOutcome::NeedsConfirmation {
                draft: log,
                raw_minutes,
            });
        }

        self.session = None;
        Ok(ClockOutOutcome::Finalized(log))
    }

    fn rejected(&self, action: &'static str) -> AppError {
        AppError::InvalidTransition {
            action,
            state: self.state(),
        }
    }
}

fn fold_break(session: &mut ActiveSession, end: DateTime<Utc>) {
    if let Some(started) = session.break_start_time.take() {
        session.accumulated_break_time += (end - started).num_milliseconds().max(0);
    }
    session.status = SessionStatus::Working;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(2025, 6, 16, h, m, 0)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc)
    }

    fn finalized(outcome: ClockOutOutcome) -> WorkLog {
        match outcome {
            ClockOutOutcome::Finalized(log) => log,
            other => panic!("expected finalized log, got {other:?}"),
        }
    }

    #[test]
    fn full_cycle_with_explicit_break() {
        let mut m = SessionMachine::new(None, 30);
        m.clock_in(at(9, 0)).unwrap();
        m.start_break(at(12, 0)).unwrap();
        m.end_break(at(13, 0)).unwrap();
        assert_eq!(m.session().unwrap().accumulated_break_time, 3_600_000);

        let log = finalized(m.clock_out(at(18, 0), 100.0, false).unwrap());
        assert_eq!(log.total_minutes, 480);
        assert_eq!(log.break_minutes, 60);
        assert_eq!(log.total_pay, 800);
        assert_eq!(log.start_time, "09:00");
        assert_eq!(log.end_time, "18:00");
        assert_eq!(log.date.to_string(), "2025-06-16");
        assert!(log.is_timer_entry());
        assert_eq!(m.state(), SessionState::Idle);
    }

    #[test]
    fn clock_out_from_break_folds_running_break() {
        let mut m = SessionMachine::new(None, 30);
        m.clock_in(at(9, 0)).unwrap();
        m.start_break(at(17, 0)).unwrap();

        let log = finalized(m.clock_out(at(18, 0), 100.0, false).unwrap());
        assert_eq!(log.break_minutes, 60);
        assert_eq!(log.total_minutes, 480);
        assert!(m.session().is_none());
    }

    #[test]
    fn timer_minutes_round_down_to_billing_unit() {
        let mut m = SessionMachine::new(None, 30);
        m.clock_in(at(9, 0)).unwrap();
        // 539 raw minutes
        let log = finalized(m.clock_out(at(17, 59), 100.0, false).unwrap());
        assert_eq!(log.total_minutes, 510);
        assert_eq!(log.overtime_level1_minutes, 30);
        assert_eq!(
            log.regular_minutes + log.overtime_level1_minutes + log.overtime_level2_minutes,
            log.total_minutes
        );
    }

    #[test]
    fn second_clock_in_is_rejected_without_reset() {
        let mut m = SessionMachine::new(None, 30);
        m.clock_in(at(9, 0)).unwrap();
        let before = m.session().cloned();

        let err = m.clock_in(at(10, 0)).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                state: SessionState::Working,
                ..
            }
        ));
        assert_eq!(m.session().cloned(), before);
    }

    #[test]
    fn transitions_from_wrong_state_are_rejected() {
        let mut m = SessionMachine::new(None, 30);
        assert!(m.start_break(at(9, 0)).is_err());
        assert!(m.end_break(at(9, 0)).is_err());
        assert!(m.clock_out(at(9, 0), 10.0, true).is_err());

        m.clock_in(at(9, 0)).unwrap();
        assert!(m.end_break(at(9, 5)).is_err());
        m.start_break(at(9, 10)).unwrap();
        assert!(m.start_break(at(9, 20)).is_err());
        assert_eq!(m.state(), SessionState::OnBreak);
    }

    #[test]
    fn breaks_accumulate_across_cycles() {
        let start = at(8, 0);
        let mut m = SessionMachine::new(None, 30);
        m.clock_in(start).unwrap();
        m.start_break(start + Duration::minutes(60)).unwrap();
        m.end_break(start + Duration::minutes(75)).unwrap();
        m.start_break(start + Duration::minutes(200)).unwrap();
        m.end_break(start + Duration::minutes(230)).unwrap();
        assert_eq!(m.session().unwrap().accumulated_break_time, 45 * 60_000);
    }

    #[test]
    fn zero_minutes_needs_confirmation_and_keeps_session() {
        let mut m = SessionMachine::new(None, 30);
        m.clock_in(at(9, 0)).unwrap();

        match m.clock_out(at(9, 20), 100.0, false).unwrap() {
            ClockOutOutcome::NeedsConfirmation { draft, raw_minutes } => {
                assert_eq!(raw_minutes, 20);
                assert_eq!(draft.total_minutes, 0);
                assert_eq!(draft.total_pay, 0);
            }
            other => panic!("expected confirmation request, got {other:?}"),
        }
        assert_eq!(m.state(), SessionState::Working);

        let log = finalized(m.clock_out(at(9, 20), 100.0, true).unwrap());
        assert_eq!(log.total_minutes, 0);
        assert_eq!(m.state(), SessionState::Idle);
    }

    #[test]
    fn negative_rate_is_rejected_before_anything_changes() {
        let mut m = SessionMachine::new(None, 30);
        m.clock_in(at(9, 0)).unwrap();
        assert!(matches!(
            m.clock_out(at(18, 0), -1.0, false),
            Err(AppError::InvalidRate(_))
        ));
        assert_eq!(m.state(), SessionState::Working);
    }
}
