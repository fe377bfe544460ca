// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::models::work_log::WorkLog;
use chrono::NaiveDate;

/// Parse a period (year / month / day / interval) into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = |what: &str| AppError::InvalidDate(format!("{what} in period '{r}'"));

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(invalid("start and end must have the same format"));
        }

        let (d1, _) = single_bounds(start).ok_or_else(|| invalid("invalid start"))?;
        let (_, d2) = single_bounds(end).ok_or_else(|| invalid("invalid end"))?;
        if d2 < d1 {
            return Err(invalid("end before start"));
        }
        Ok((d1, d2))
    } else {
        single_bounds(r.trim()).ok_or_else(|| invalid("unsupported format"))
    }
}

fn single_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p.get(0..4)?.parse().ok()?;
            let m: u32 = p.get(5..7)?.parse().ok()?;
            let last = month_last_day(y, m)?;
            Some((
                NaiveDate::from_ymd_opt(y, m, 1)?,
                NaiveDate::from_ymd_opt(y, m, last)?,
            ))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

/// Entries inside `period` (all of them when `None` or "all"), sorted by
/// date then start time.
pub fn filter_logs(logs: &[WorkLog], period: Option<&str>) -> AppResult<Vec<WorkLog>> {
    let bounds = match period {
        None => None,
        Some(p) if p.eq_ignore_ascii_case("all") => None,
        Some(p) => Some(parse_range(p)?),
    };

    let mut out: Vec<WorkLog> = logs
        .iter()
        .filter(|l| bounds.is_none_or(|(from, to)| l.date >= from && l.date <= to))
        .cloned()
        .collect();
    out.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
    Ok(out)
}
