//! Tiered overtime pay computation.
//!
//! Minutes fill the tiers in order: the first 8 hours are paid at the base
//! rate, the next 2 hours at 1.34x and everything beyond 10 hours at 1.67x.

/// Minutes paid at the base rate.
pub const REGULAR_CAP_MINUTES: i64 = 480;
/// Minutes paid at the first overtime multiplier.
pub const OVERTIME_LEVEL1_CAP_MINUTES: i64 = 120;

pub const REGULAR_MULTIPLIER: f64 = 1.0;
pub const OVERTIME_LEVEL1_MULTIPLIER: f64 = 1.34;
pub const OVERTIME_LEVEL2_MULTIPLIER: f64 = 1.67;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayBreakdown {
    pub regular_minutes: i64,
    pub overtime_level1_minutes: i64,
    pub overtime_level2_minutes: i64,
    pub total_pay: i64,
}

/// Split `total_minutes` into tiers and price them at `hourly_rate`.
///
/// Callers validate inputs first (see [`validate_rate`]); negative minutes
/// are clamped to zero. The pay is rounded once, on the summed amount.
pub fn compute_breakdown(total_minutes: i64, hourly_rate: f64) -> PayBreakdown {
    let total = total_minutes.max(0);

    let regular_minutes = total.min(REGULAR_CAP_MINUTES);
    let remaining = total - regular_minutes;
    let overtime_level1_minutes = remaining.min(OVERTIME_LEVEL1_CAP_MINUTES);
    let overtime_level2_minutes = remaining - overtime_level1_minutes;

    let amount = (regular_minutes as f64 / 60.0) * hourly_rate * REGULAR_MULTIPLIER
        + (overtime_level1_minutes as f64 / 60.0) * hourly_rate * OVERTIME_LEVEL1_MULTIPLIER
        + (overtime_level2_minutes as f64 / 60.0) * hourly_rate * OVERTIME_LEVEL2_MULTIPLIER;

    PayBreakdown {
        regular_minutes,
        overtime_level1_minutes,
        overtime_level2_minutes,
        total_pay: amount.round() as i64,
    }
}

/// Reject rates that cannot be priced.
pub fn validate_rate(rate: f64) -> crate::errors::AppResult<f64> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(rate)
    } else {
        Err(crate::errors::AppError::InvalidRate(rate.to_string()))
    }
}
