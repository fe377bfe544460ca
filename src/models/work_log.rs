use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::pay::PayBreakdown;

/// Note attached to every entry produced by the clock-in/clock-out timer.
pub const TIMER_NOTE: &str = "[timer]";

/// A finalized shift. Immutable once created; removed only by explicit delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    pub id: String,
    pub date: NaiveDate,    // YYYY-MM-DD, day the shift is attributed to
    pub start_time: String, // HH:MM
    pub end_time: String,   // HH:MM
    pub break_minutes: i64,
    pub hourly_rate: f64,
    pub total_minutes: i64,
    pub regular_minutes: i64,
    pub overtime_level1_minutes: i64,
    pub overtime_level2_minutes: i64,
    pub total_pay: i64,
    #[serde(default)]
    pub note: Option<String>,
}

impl WorkLog {
    /// Build a new entry with a fresh id from a computed pay breakdown.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        start_time: String,
        end_time: String,
        break_minutes: i64,
        hourly_rate: f64,
        total_minutes: i64,
        pay: PayBreakdown,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            start_time,
            end_time,
            break_minutes,
            hourly_rate,
            total_minutes,
            regular_minutes: pay.regular_minutes,
            overtime_level1_minutes: pay.overtime_level1_minutes,
            overtime_level2_minutes: pay.overtime_level2_minutes,
            total_pay: pay.total_pay,
            note,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_timer_entry(&self) -> bool {
        self.note.as_deref() == Some(TIMER_NOTE)
    }

    /// Tier minutes add up to the total and nothing is negative.
    pub fn is_consistent(&self) -> bool {
        let tiers = [
            self.regular_minutes,
            self.overtime_level1_minutes,
            self.overtime_level2_minutes,
        ];
        !self.id.is_empty()
            && self.break_minutes >= 0
            && self.hourly_rate >= 0.0
            && self.hourly_rate.is_finite()
            && self.total_pay >= 0
            && tiers.iter().all(|m| *m >= 0)
            && tiers.iter().sum::<i64>() == self.total_minutes
    }
}
