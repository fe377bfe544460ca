use chrono::Datelike;
use std::collections::BTreeMap;

use crate::models::summary::{DaySummary, MonthSummary};
use crate::models::work_log::WorkLog;

/// Per-day totals, ordered by date.
pub fn daily_summaries(logs: &[WorkLog]) -> Vec<DaySummary> {
    let mut by_day: BTreeMap<_, DaySummary> = BTreeMap::new();

    for log in logs {
        let day = by_day.entry(log.date).or_insert_with(|| DaySummary {
            date: log.date,
            entries: 0,
            total_minutes: 0,
            regular_minutes: 0,
            overtime_level1_minutes: 0,
            overtime_level2_minutes: 0,
            break_minutes: 0,
            total_pay: 0,
        });
        day.entries += 1;
        day.total_minutes += log.total_minutes;
        day.regular_minutes += log.regular_minutes;
        day.overtime_level1_minutes += log.overtime_level1_minutes;
        day.overtime_level2_minutes += log.overtime_level2_minutes;
        day.break_minutes += log.break_minutes;
        day.total_pay += log.total_pay;
    }

    by_day.into_values().collect()
}

/// Per-month totals, ordered by (year, month).
pub fn monthly_summaries(logs: &[WorkLog]) -> Vec<MonthSummary> {
    let mut by_month: BTreeMap<(i32, u32), MonthSummary> = BTreeMap::new();

    for day in daily_summaries(logs) {
        let key = (day.date.year(), day.date.month());
        let m = by_month.entry(key).or_insert_with(|| MonthSummary {
            year: key.0,
            month: key.1,
            ..Default::default()
        });
        m.days_worked += 1;
        m.entries += day.entries;
        m.total_minutes += day.total_minutes;
        m.regular_minutes += day.regular_minutes;
        m.overtime_level1_minutes += day.overtime_level1_minutes;
        m.overtime_level2_minutes += day.overtime_level2_minutes;
        m.break_minutes += day.break_minutes;
        m.total_pay += day.total_pay;
    }

    by_month.into_values().collect()
}
