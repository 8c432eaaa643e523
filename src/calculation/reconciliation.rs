//! Clock event reconciliation.
//!
//! Turns a stream of raw clock events into per-day worked hours. Events
//! are grouped by calendar day and paired clock-in to clock-out in
//! timestamp order. Each pair's duration is rounded to the nearest
//! rostering increment (five minutes by default) and an unpaid break is
//! deducted from pairs long enough to require one.
//!
//! Malformed sequences never abort reconciliation. A duplicate clock-in,
//! an orphaned clock-out, or a clock-in that is still open at the end of
//! the day is recorded as a [`ReconciliationAnomaly`] and the rest of the
//! day is processed normally, so one bad punch cannot suppress a whole
//! week of pay.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::ReconciliationRules;
use crate::models::{ClockEvent, DayHours, EventKind, ReconciliationAnomaly, WeeklyHours};

use super::week::WeekWindow;

const SECONDS_PER_MINUTE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Worked hours and anomalies for a single calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReconciliation {
    /// The day the events were reconciled for.
    pub date: NaiveDate,
    /// Total paid hours across all pairs on the day.
    pub hours_worked: Decimal,
    /// Events that could not be paired cleanly.
    pub anomalies: Vec<ReconciliationAnomaly>,
}

/// Worked hours and anomalies over a span of consecutive days.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeReconciliation {
    /// One entry per day in the span, zero-filled for days without events.
    pub days: Vec<DayHours>,
    /// Anomalies across the whole span, in day order.
    pub anomalies: Vec<ReconciliationAnomaly>,
}

impl RangeReconciliation {
    /// Sum of worked hours across the span.
    pub fn total_hours(&self) -> Decimal {
        self.days.iter().map(|day| day.hours_worked).sum()
    }
}

/// Reconciles the clock events that fall on `date`.
///
/// Events on other days are ignored, so callers may pass a wider slice
/// than the day being reconciled. Break events never participate in
/// pairing. The events are expected to belong to a single staff member.
pub fn reconcile_day(
    date: NaiveDate,
    events: &[ClockEvent],
    rules: &ReconciliationRules,
) -> DayReconciliation {
    let mut day_events: Vec<&ClockEvent> = events
        .iter()
        .filter(|event| event.timestamp.date() == date && event.kind != EventKind::Break)
        .collect();
    day_events.sort_by_key(|event| event.timestamp);

    let mut open_in: Option<&ClockEvent> = None;
    let mut hours_worked = Decimal::ZERO;
    let mut anomalies = Vec::new();

    for event in day_events {
        match event.kind {
            EventKind::ClockIn => {
                if open_in.is_some() {
                    anomalies.push(anomaly(
                        event,
                        "clock-in while a previous clock-in was still open",
                    ));
                } else {
                    open_in = Some(event);
                }
            }
            EventKind::ClockOut => match open_in.take() {
                Some(entry) => {
                    hours_worked += pair_hours(entry.timestamp, event.timestamp, rules);
                }
                None => {
                    anomalies.push(anomaly(event, "clock-out with no open clock-in"));
                }
            },
            EventKind::Break => {}
        }
    }

    if let Some(entry) = open_in {
        anomalies.push(anomaly(
            entry,
            "clock-in with no matching clock-out by end of day",
        ));
    }

    DayReconciliation {
        date,
        hours_worked,
        anomalies,
    }
}

/// Reconciles every day from `first` to `last` inclusive.
///
/// Days without events appear with zero hours so the result always has
/// one entry per day in the span. An empty span (`last` before `first`)
/// yields an empty result.
pub fn reconcile_range(
    first: NaiveDate,
    last: NaiveDate,
    events: &[ClockEvent],
    rules: &ReconciliationRules,
) -> RangeReconciliation {
    let mut days = Vec::new();
    let mut anomalies = Vec::new();

    for date in first.iter_days().take_while(|date| *date <= last) {
        let day = reconcile_day(date, events, rules);
        days.push(DayHours {
            date: day.date,
            hours_worked: day.hours_worked,
        });
        anomalies.extend(day.anomalies);
    }

    RangeReconciliation { days, anomalies }
}

/// Reconciles a full Monday-aligned week of clock events.
///
/// # Arguments
///
/// * `week` - The week window to reconcile
/// * `events` - Clock events for one staff member, any order
/// * `rules` - Rounding and break deduction parameters
///
/// # Returns
///
/// A [`WeeklyHours`] with exactly seven day entries, Monday through
/// Sunday, zero-filled for days without events.
pub fn reconcile_week(
    week: WeekWindow,
    events: &[ClockEvent],
    rules: &ReconciliationRules,
) -> WeeklyHours {
    let sunday = week.end_exclusive() - Duration::days(1);
    let range = reconcile_range(week.start(), sunday, events, rules);

    WeeklyHours {
        week_start: week.start(),
        days: range.days,
        anomalies: range.anomalies,
    }
}

/// Paid hours for one clock-in/clock-out pair.
///
/// The raw duration in minutes is rounded to the nearest increment with
/// midpoints rounding away from zero, converted to hours, and reduced by
/// the unpaid break when the pair exceeds the break threshold.
fn pair_hours(clock_in: NaiveDateTime, clock_out: NaiveDateTime, rules: &ReconciliationRules) -> Decimal {
    let minutes = Decimal::from((clock_out - clock_in).num_seconds()) / SECONDS_PER_MINUTE;
    let increment = Decimal::from(rules.rounding_increment_minutes);
    let rounded_minutes = (minutes / increment)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * increment;

    let mut hours = rounded_minutes / MINUTES_PER_HOUR;
    if hours > rules.break_deduction_threshold_hours {
        hours -= rules.break_deduction_hours;
    }
    hours
}

fn anomaly(event: &ClockEvent, note: &str) -> ReconciliationAnomaly {
    ReconciliationAnomaly {
        staff_id: event.staff_id,
        timestamp: event.timestamp,
        kind: event.kind,
        note: note.to_string(),
    }
}
