//! Scheduled hours calculation.
//!
//! Shift assignments store their planned duration as a whole number of
//! hours. The duration is derived from the shift's start and end
//! datetimes and rounded to the nearest hour using banker's rounding
//! (round half to even), so a 7.5 hour shift books 8 hours while an
//! 8.5 hour shift also books 8.

use chrono::NaiveDateTime;

use crate::error::{EngineError, EngineResult};

/// Calculates the whole scheduled hours between two datetimes.
///
/// The raw duration in seconds is rounded to the nearest hour. Exact
/// half hours round to the nearest *even* hour count, which keeps
/// aggregate rostered hours unbiased across many shifts.
///
/// # Arguments
///
/// * `start` - When the shift begins
/// * `end` - When the shift ends (may be on a later calendar day)
///
/// # Returns
///
/// The rounded hour count, or [`EngineError::InvalidInterval`] when
/// `end` is not strictly after `start`.
///
/// # Examples
///
/// ```
/// use farmtime_engine::calculation::calculate_scheduled_hours;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let start = day.and_hms_opt(8, 0, 0).unwrap();
/// let end = day.and_hms_opt(16, 30, 0).unwrap();
///
/// // 8.5 hours rounds half-to-even down to 8.
/// assert_eq!(calculate_scheduled_hours(start, end).unwrap(), 8);
/// ```
pub fn calculate_scheduled_hours(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<i64> {
    if end <= start {
        return Err(EngineError::InvalidInterval { start, end });
    }

    let seconds = (end - start).num_seconds();
    let whole = seconds / 3600;
    let remainder = seconds % 3600;

    // Round half to even on the 30-minute midpoint.
    let rounded = match remainder.cmp(&1800) {
        std::cmp::Ordering::Less => whole,
        std::cmp::Ordering::Greater => whole + 1,
        std::cmp::Ordering::Equal => whole + (whole % 2),
    };

    Ok(rounded)
}
