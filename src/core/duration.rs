//! Duration helpers shared by the timer and the manual entry path.

use chrono::{NaiveTime, Timelike};

use crate::utils::time::parse_time;

pub const DEFAULT_BILLING_UNIT: i64 = 30;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes from `start` to `end`, wrapping past midnight when `end` is
/// earlier than `start`. Missing or unparsable inputs yield 0.
pub fn duration_minutes(start: Option<&str>, end: Option<&str>) -> i64 {
    match (
        start.filter(|s| !s.trim().is_empty()).and_then(parse_time),
        end.filter(|s| !s.trim().is_empty()).and_then(parse_time),
    ) {
        (Some(s), Some(e)) => minutes_between_wrapping(s, e),
        _ => 0,
    }
}

pub fn minutes_between_wrapping(start: NaiveTime, end: NaiveTime) -> i64 {
    let s = minute_of_day(start);
    let mut e = minute_of_day(end);
    if e < s {
        e += MINUTES_PER_DAY;
    }
    e - s
}

fn minute_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Round raw minutes down to a multiple of `unit`. Never rounds up.
/// A non-positive unit disables rounding.
pub fn round_to_billing_unit(raw_minutes: i64, unit: i64) -> i64 {
    let raw = raw_minutes.max(0);
    if unit <= 0 {
        return raw;
    }
    raw / unit * unit
}

/// Whole minutes contained in a millisecond span.
pub fn ms_to_minutes(ms: i64) -> i64 {
    ms.max(0) / 60_000
}
