use chrono::NaiveDate;
use serde::Serialize;

/// Aggregated totals of every entry attributed to one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub entries: usize,
    pub total_minutes: i64,
    pub regular_minutes: i64,
    pub overtime_level1_minutes: i64,
    pub overtime_level2_minutes: i64,
    pub break_minutes: i64,
    pub total_pay: i64,
}

/// Aggregated totals for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub days_worked: usize,
    pub entries: usize,
    pub total_minutes: i64,
    pub regular_minutes: i64,
    pub overtime_level1_minutes: i64,
    pub overtime_level2_minutes: i64,
    pub break_minutes: i64,
    pub total_pay: i64,
}
