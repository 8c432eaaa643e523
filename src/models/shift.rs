//! Shift (roster entry) model.
//!
//! This module defines the Shift struct representing a scheduled work
//! interval assigned to a staff member, and the NewShift input used when
//! persisting one.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// Represents a scheduled work interval (roster entry) for a staff member.
///
/// Invariant: `end_time > start_time`. Shifts spanning midnight carry an
/// `end_time` on the following calendar day; timing arithmetic always uses
/// the absolute datetimes, never time-of-day values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift, assigned by the store.
    pub shift_id: i64,
    /// The staff member the shift is assigned to.
    pub staff_id: i64,
    /// The scheduled start of the shift.
    pub start_time: NaiveDateTime,
    /// The scheduled end of the shift.
    pub end_time: NaiveDateTime,
    /// The rounded whole-hour length of the shift, for roster display.
    pub schedule_hours: i64,
}

impl Shift {
    /// Returns the calendar day the shift starts on.
    ///
    /// Roster lookups and overlap checks key shifts by this date.
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Returns true if the shift ends on a later calendar day than it
    /// starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use farmtime_engine::models::Shift;
    /// use chrono::NaiveDate;
    ///
    /// let night = Shift {
    ///     shift_id: 1,
    ///     staff_id: 7,
    ///     start_time: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap().and_hms_opt(6, 0, 0).unwrap(),
    ///     schedule_hours: 8,
    /// };
    /// assert!(night.is_overnight());
    /// ```
    pub fn is_overnight(&self) -> bool {
        self.end_time.date() > self.start_time.date()
    }

    /// Returns the day of the week the shift starts on.
    pub fn day_of_week(&self) -> Weekday {
        self.start_time.date().weekday()
    }
}

/// Input for persisting a new shift; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShift {
    /// The staff member the shift is assigned to.
    pub staff_id: i64,
    /// The scheduled start of the shift.
    pub start_time: NaiveDateTime,
    /// The scheduled end of the shift.
    pub end_time: NaiveDateTime,
    /// The rounded whole-hour length of the shift.
    pub schedule_hours: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_shift(start: NaiveDateTime, end: NaiveDateTime) -> Shift {
        Shift {
            shift_id: 1,
            staff_id: 7,
            start_time: start,
            end_time: end,
            schedule_hours: 8,
        }
    }

    /// SH-001: a same-day shift is not overnight
    #[test]
    fn test_same_day_shift_is_not_overnight() {
        let shift = make_shift(
            make_datetime("2025-01-06", "09:00:00"),
            make_datetime("2025-01-06", "17:00:00"),
        );
        assert!(!shift.is_overnight());
    }

    /// SH-002: a shift ending after midnight is overnight
    #[test]
    fn test_shift_ending_after_midnight_is_overnight() {
        let shift = make_shift(
            make_datetime("2025-01-06", "22:00:00"),
            make_datetime("2025-01-07", "06:00:00"),
        );
        assert!(shift.is_overnight());
    }

    /// SH-003: start_date keys the shift by its first calendar day
    #[test]
    fn test_start_date_uses_first_calendar_day() {
        let shift = make_shift(
            make_datetime("2025-01-06", "22:00:00"),
            make_datetime("2025-01-07", "06:00:00"),
        );
        assert_eq!(
            shift.start_date(),
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_day_of_week() {
        // 2025-01-06 is a Monday
        let monday = make_shift(
            make_datetime("2025-01-06", "09:00:00"),
            make_datetime("2025-01-06", "17:00:00"),
        );
        assert_eq!(monday.day_of_week(), Weekday::Mon);

        // 2025-01-11 is a Saturday
        let saturday = make_shift(
            make_datetime("2025-01-11", "09:00:00"),
            make_datetime("2025-01-11", "17:00:00"),
        );
        assert_eq!(saturday.day_of_week(), Weekday::Sat);
    }

    #[test]
    fn test_shift_serialization_round_trip() {
        let shift = make_shift(
            make_datetime("2025-01-06", "09:00:00"),
            make_datetime("2025-01-06", "17:00:00"),
        );

        let json = serde_json::to_string(&shift).unwrap();
        let deserialized: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, deserialized);
    }

    #[test]
    fn test_shift_deserialization() {
        let json = r#"{
            "shift_id": 12,
            "staff_id": 7,
            "start_time": "2025-01-06T09:00:00",
            "end_time": "2025-01-06T17:00:00",
            "schedule_hours": 8
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.shift_id, 12);
        assert_eq!(shift.staff_id, 7);
        assert_eq!(shift.schedule_hours, 8);
    }
}
