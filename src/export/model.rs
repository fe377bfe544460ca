// src/export/model.rs

use serde::Serialize;

use crate::models::work_log::WorkLog;

/// Flat row used by every export format. Values are copied verbatim from
/// the stored entry.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogExport {
    pub id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub break_minutes: i64,
    pub hourly_rate: f64,
    pub total_minutes: i64,
    pub regular_minutes: i64,
    pub overtime_level1_minutes: i64,
    pub overtime_level2_minutes: i64,
    pub total_pay: i64,
    pub note: String,
}

impl From<&WorkLog> for WorkLogExport {
    fn from(l: &WorkLog) -> Self {
        Self {
            id: l.id.clone(),
            date: l.date_str(),
            start_time: l.start_time.clone(),
            end_time: l.end_time.clone(),
            break_minutes: l.break_minutes,
            hourly_rate: l.hourly_rate,
            total_minutes: l.total_minutes,
            regular_minutes: l.regular_minutes,
            overtime_level1_minutes: l.overtime_level1_minutes,
            overtime_level2_minutes: l.overtime_level2_minutes,
            total_pay: l.total_pay,
            note: l.note.clone().unwrap_or_default(),
        }
    }
}
