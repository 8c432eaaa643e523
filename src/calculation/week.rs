//! Week window resolution.
//!
//! This module provides the canonical Monday-of-week calculation and the
//! [`WeekWindow`] type describing the half-open `[Monday 00:00, next
//! Monday 00:00)` interval every weekly operation works over. One formula
//! serves reconciliation, payslip uniqueness, and roster week views alike
//! so that Sunday-anchored dates can never resolve to different weeks in
//! different subsystems.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Returns the Monday of the week containing `date`.
///
/// Sunday dates resolve to the *preceding* Monday.
///
/// # Examples
///
/// ```
/// use farmtime_engine::calculation::monday_of_week;
/// use chrono::NaiveDate;
///
/// // 2025-01-08 is a Wednesday; its week starts 2025-01-06.
/// let wednesday = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
/// assert_eq!(
///     monday_of_week(wednesday),
///     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
/// );
///
/// // 2025-01-12 is a Sunday; it belongs to the week of 2025-01-06.
/// let sunday = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
/// assert_eq!(
///     monday_of_week(sunday),
///     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
/// );
/// ```
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The Monday-aligned week containing a reference date.
///
/// A derived value, never stored. Covers the half-open interval
/// `[Monday 00:00, next Monday 00:00)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// Builds the week window containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: monday_of_week(date),
        }
    }

    /// The Monday the week starts on.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The Monday of the following week (exclusive end of the window).
    pub fn end_exclusive(&self) -> NaiveDate {
        self.start + Duration::days(7)
    }

    /// Iterates the seven days of the week, Monday through Sunday.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..7).map(move |offset| start + Duration::days(offset))
    }

    /// Returns true if `date` falls inside the week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end_exclusive()
    }

    /// The half-open datetime range `[Monday 00:00, next Monday 00:00)`
    /// used for event and shift queries.
    pub fn datetime_range(&self) -> (NaiveDateTime, NaiveDateTime) {
        (
            start_of_day(self.start),
            start_of_day(self.end_exclusive()),
        )
    }
}

/// Returns midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==========================================================================
    // WK-001: a Monday anchors its own week
    // ==========================================================================
    #[test]
    fn test_wk_001_monday_anchors_its_own_week() {
        let monday = date(2025, 1, 6);
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(monday_of_week(monday), monday);
    }

    // ==========================================================================
    // WK-002: midweek dates resolve backwards to Monday
    // ==========================================================================
    #[test]
    fn test_wk_002_midweek_resolves_to_monday() {
        assert_eq!(monday_of_week(date(2025, 1, 7)), date(2025, 1, 6)); // Tuesday
        assert_eq!(monday_of_week(date(2025, 1, 9)), date(2025, 1, 6)); // Thursday
        assert_eq!(monday_of_week(date(2025, 1, 11)), date(2025, 1, 6)); // Saturday
    }

    // ==========================================================================
    // WK-003: Sunday resolves to the preceding Monday, never the next day
    // ==========================================================================
    #[test]
    fn test_wk_003_sunday_resolves_to_preceding_monday() {
        let sunday = date(2025, 1, 12);
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert_eq!(monday_of_week(sunday), date(2025, 1, 6));

        // Across a month boundary too: 2025-03-02 is a Sunday.
        let sunday = date(2025, 3, 2);
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert_eq!(monday_of_week(sunday), date(2025, 2, 24));
    }

    #[test]
    fn test_week_window_days_cover_monday_through_sunday() {
        let week = WeekWindow::containing(date(2025, 1, 9));
        let days: Vec<NaiveDate> = week.days().collect();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2025, 1, 6));
        assert_eq!(days[0].weekday(), Weekday::Mon);
        assert_eq!(days[6], date(2025, 1, 12));
        assert_eq!(days[6].weekday(), Weekday::Sun);
    }

    #[test]
    fn test_week_window_contains_is_half_open() {
        let week = WeekWindow::containing(date(2025, 1, 6));

        assert!(week.contains(date(2025, 1, 6)));
        assert!(week.contains(date(2025, 1, 12)));
        assert!(!week.contains(date(2025, 1, 13))); // next Monday
        assert!(!week.contains(date(2025, 1, 5)));
    }

    #[test]
    fn test_week_window_datetime_range_spans_midnight_to_midnight() {
        let week = WeekWindow::containing(date(2025, 1, 8));
        let (from, to) = week.datetime_range();

        assert_eq!(from, date(2025, 1, 6).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(to, date(2025, 1, 13).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_same_window_for_every_day_of_week() {
        let reference = WeekWindow::containing(date(2025, 1, 6));
        for day in reference.days() {
            assert_eq!(WeekWindow::containing(day), reference);
        }
    }

    #[test]
    fn test_window_crossing_year_boundary() {
        // 2025-01-01 is a Wednesday; its week starts Monday 2024-12-30.
        let week = WeekWindow::containing(date(2025, 1, 1));
        assert_eq!(week.start(), date(2024, 12, 30));
        assert_eq!(week.end_exclusive(), date(2025, 1, 6));
    }
}
