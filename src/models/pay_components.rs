//! Intermediate payroll computation types.
//!
//! This module contains the per-week hour buckets produced by the overtime
//! classifier, the priced pay lines that make up gross pay, and the
//! reconciliation outputs (per-day hours and pairing anomalies).

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::EventKind;

/// Represents the category of pay for a pay line.
///
/// Categories distinguish base-rate ordinary time from the overtime tiers
/// and the weekend penalty bucket.
///
/// # Example
///
/// ```
/// use farmtime_engine::models::PayCategory;
///
/// let category = PayCategory::DailyOvertime;
/// assert_eq!(category.to_string(), "daily_overtime");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayCategory {
    /// Ordinary weekday hours at the base rate.
    Ordinary,
    /// Hours beyond the daily threshold on a single weekday (1.5x).
    DailyOvertime,
    /// The first tier of weekly overtime beyond the standard week (1.5x).
    WeeklyOvertimeTier1,
    /// The remaining weekly overtime beyond the first tier (2.0x).
    WeeklyOvertimeTier2,
    /// Saturday and Sunday hours (2.0x).
    Weekend,
}

impl fmt::Display for PayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PayCategory::Ordinary => "ordinary",
            PayCategory::DailyOvertime => "daily_overtime",
            PayCategory::WeeklyOvertimeTier1 => "weekly_overtime_tier1",
            PayCategory::WeeklyOvertimeTier2 => "weekly_overtime_tier2",
            PayCategory::Weekend => "weekend",
        };
        write!(f, "{}", label)
    }
}

/// A single priced line in a weekly pay classification.
///
/// Each line captures the hours classified into one category, the
/// multiplier applied to the base rate, the effective hourly rate, and
/// the resulting amount. Gross pay is exactly the sum of line amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// The category of pay.
    pub category: PayCategory,
    /// The number of hours in this category.
    pub hours: Decimal,
    /// The multiplier applied to the base rate (1.0, 1.5, or 2.0).
    pub multiplier: Decimal,
    /// The effective hourly rate (base rate times multiplier).
    pub rate: Decimal,
    /// The total amount for this line (hours times rate).
    pub amount: Decimal,
}

/// Weekly hour buckets produced by the overtime classifier.
///
/// Invariant: the weekend bucket and the weekday buckets are mutually
/// exclusive per day, and the buckets sum to the total reconciled hours
/// of the week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponents {
    /// Weekday hours paid at the base rate.
    pub ordinary_hours: Decimal,
    /// Weekday hours beyond the daily threshold (1.5x).
    pub daily_overtime_hours: Decimal,
    /// First-tier weekly overtime hours (1.5x).
    pub weekly_overtime_tier1_hours: Decimal,
    /// Second-tier weekly overtime hours (2.0x).
    pub weekly_overtime_tier2_hours: Decimal,
    /// Saturday and Sunday hours (2.0x).
    pub weekend_hours: Decimal,
}

impl PayComponents {
    /// Returns the sum of all buckets.
    pub fn total_hours(&self) -> Decimal {
        self.ordinary_hours
            + self.daily_overtime_hours
            + self.weekly_overtime_tier1_hours
            + self.weekly_overtime_tier2_hours
            + self.weekend_hours
    }
}

/// Worked hours reconciled for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// The calendar day.
    pub date: NaiveDate,
    /// Hours worked that day after rounding and break deduction.
    pub hours_worked: Decimal,
}

/// An unmatched clock event found while pairing a day's events.
///
/// Anomalies are reported alongside reconciled hours rather than silently
/// dropped, so payroll staff can correct the underlying records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationAnomaly {
    /// The staff member the event belongs to.
    pub staff_id: i64,
    /// When the unmatched event occurred.
    pub timestamp: NaiveDateTime,
    /// The kind of the unmatched event.
    pub kind: EventKind,
    /// What was wrong with the sequence at this event.
    pub note: String,
}

/// The result of reconciling a staff member's clock events over a week.
///
/// Contains one entry per calendar day (zero-filled where no valid pairs
/// exist) plus any pairing anomalies encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    /// The Monday the week starts on.
    pub week_start: NaiveDate,
    /// Per-day worked hours, ordered Monday through Sunday.
    pub days: Vec<DayHours>,
    /// Unmatched events found during pairing.
    pub anomalies: Vec<ReconciliationAnomaly>,
}

impl WeeklyHours {
    /// Returns the total hours worked across the week.
    pub fn total_hours(&self) -> Decimal {
        self.days.iter().map(|d| d.hours_worked).sum()
    }

    /// Returns the hours worked on the given day, zero if the day is not
    /// part of this week.
    pub fn hours_on(&self, date: NaiveDate) -> Decimal {
        self.days
            .iter()
            .find(|d| d.date == date)
            .map(|d| d.hours_worked)
            .unwrap_or(Decimal::ZERO)
    }
}
