//! Manual entry path: explicit start/end times typed by the user.
//!
//! Unlike the timer, worked minutes are taken as-is, without rounding to the
//! billing unit, and a non-positive result is rejected outright.

use chrono::NaiveDate;

use crate::core::duration::duration_minutes;
use crate::core::pay::{compute_breakdown, validate_rate};
use crate::errors::{AppError, AppResult};
use crate::models::work_log::WorkLog;
use crate::utils::time::parse_time;

/// How the break of a manual entry is expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakInput {
    None,
    Minutes(i64),
    Window { start: String, end: String },
}

impl BreakInput {
    pub fn minutes(&self) -> AppResult<i64> {
        match self {
            BreakInput::None => Ok(0),
            BreakInput::Minutes(m) if *m >= 0 => Ok(*m),
            BreakInput::Minutes(m) => Err(AppError::InvalidTime(format!(
                "break minutes must be non-negative, got {m}"
            ))),
            BreakInput::Window { start, end } => {
                check_hhmm(start)?;
                check_hhmm(end)?;
                Ok(duration_minutes(Some(start.as_str()), Some(end.as_str())))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub brk: BreakInput,
    pub hourly_rate: f64,
    pub note: Option<String>,
}

impl ManualEntry {
    /// Validate and price the entry.
    pub fn into_work_log(self) -> AppResult<WorkLog> {
        let rate = validate_rate(self.hourly_rate)?;
        check_hhmm(&self.start)?;
        check_hhmm(&self.end)?;

        let break_minutes = self.brk.minutes()?;
        let span = duration_minutes(Some(self.start.as_str()), Some(self.end.as_str()));
        let actual_minutes = (span - break_minutes).max(0);

        if actual_minutes <= 0 {
            return Err(AppError::ZeroDuration(format!(
                "{} → {} with {} min break leaves no worked time",
                self.start, self.end, break_minutes
            )));
        }

        let note = self.note.filter(|n| !n.trim().is_empty());

        Ok(WorkLog::new(
            self.date,
            normalize_hhmm(&self.start),
            normalize_hhmm(&self.end),
            break_minutes,
            rate,
            actual_minutes,
            compute_breakdown(actual_minutes, rate),
            note,
        ))
    }
}

fn check_hhmm(s: &str) -> AppResult<()> {
    parse_time(s)
        .map(|_| ())
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

fn normalize_hhmm(s: &str) -> String {
    parse_time(s)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| s.to_string())
}
