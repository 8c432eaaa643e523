//! Clock-attempt validation and event recording.
//!
//! Clock attempts are validated against the roster before an event is
//! written: a clock-in must fall inside a tolerance window around the
//! rostered start, a clock-out inside a window around the rostered end.
//! Windows are absolute datetimes, so overnight shifts validate across
//! the midnight boundary without any time-of-day wrap-around. An admin
//! override bypasses validation entirely and stamps the event with the
//! authorizing admin and reason.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::start_of_day;
use crate::config::EngineRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AdminOverride, ClockEvent, EventKind, NewClockEvent, Shift, ValidationResult};
use crate::store::{AuditLog, AuditRecord, EventStore, ShiftStore};

/// A recorded clock event together with its confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfirmation {
    /// The persisted clock event.
    pub event: ClockEvent,
    /// The device-facing confirmation, e.g. "Clock-in recorded at 08:55".
    pub message: String,
}

/// Validates clock attempts against the roster and records clock events.
pub struct TimeclockService {
    shifts: Arc<dyn ShiftStore>,
    events: Arc<dyn EventStore>,
    audit: Arc<dyn AuditLog>,
    rules: Arc<EngineRules>,
}

impl TimeclockService {
    /// Creates a timeclock service over the given stores, audit sink,
    /// and rules.
    pub fn new(
        shifts: Arc<dyn ShiftStore>,
        events: Arc<dyn EventStore>,
        audit: Arc<dyn AuditLog>,
        rules: Arc<EngineRules>,
    ) -> Self {
        Self {
            shifts,
            events,
            audit,
            rules,
        }
    }

    /// Validates a clock-in attempt against the roster.
    ///
    /// The attempt is checked against the earliest shift rostered on the
    /// attempt's calendar day. The allowed window runs from the
    /// configured minutes before the rostered start through the
    /// configured minutes after it, both ends inclusive.
    ///
    /// # Arguments
    ///
    /// * `staff_id` - The staff member attempting to clock in
    /// * `attempt` - When the attempt was made
    ///
    /// # Returns
    ///
    /// A [`ValidationResult`] carrying `SUCCESS`, `NO_ROSTER`, or
    /// `OUTSIDE_WINDOW` with a device-facing message.
    pub fn validate_clock_in(
        &self,
        staff_id: i64,
        attempt: NaiveDateTime,
    ) -> EngineResult<ValidationResult> {
        let target_date = attempt.date();
        let Some(shift) = self.first_shift_on(staff_id, target_date)? else {
            return Ok(ValidationResult::no_roster(format!(
                "No roster assignment found for staff ID {} on {}",
                staff_id, target_date
            )));
        };

        let timing = &self.rules.timeclock;
        let earliest = shift.start_time - Duration::minutes(timing.early_clock_in_minutes);
        let latest = shift.start_time + Duration::minutes(timing.late_clock_in_minutes);
        Ok(window_result(&shift, EventKind::ClockIn, attempt, earliest, latest))
    }

    /// Validates a clock-out attempt against the roster.
    ///
    /// Looks for a shift rostered on the attempt's calendar day and,
    /// failing that, on the previous day, so overnight shifts can be
    /// clocked out after midnight. The allowed window surrounds the
    /// rostered end.
    pub fn validate_clock_out(
        &self,
        staff_id: i64,
        attempt: NaiveDateTime,
    ) -> EngineResult<ValidationResult> {
        let target_date = attempt.date();
        let shift = match self.first_shift_on(staff_id, target_date)? {
            Some(shift) => Some(shift),
            None => self.first_shift_on(staff_id, target_date - Duration::days(1))?,
        };
        let Some(shift) = shift else {
            return Ok(ValidationResult::no_roster(format!(
                "No roster assignment found for staff ID {} around {}",
                staff_id, target_date
            )));
        };

        let timing = &self.rules.timeclock;
        let earliest = shift.end_time - Duration::minutes(timing.early_clock_out_minutes);
        let latest = shift.end_time + Duration::minutes(timing.late_clock_out_minutes);
        Ok(window_result(&shift, EventKind::ClockOut, attempt, earliest, latest))
    }

    /// Records a clock-in event.
    ///
    /// Without an override the attempt is validated first and an invalid
    /// attempt fails with
    /// [`ValidationFailed`](crate::error::EngineError::ValidationFailed),
    /// leaving nothing persisted. With an override the validator is not
    /// consulted at all; the event is stamped with the authorizing admin
    /// and reason.
    pub fn record_clock_in(
        &self,
        staff_id: i64,
        device_id: Option<i64>,
        attempt: NaiveDateTime,
        admin_override: Option<AdminOverride>,
    ) -> EngineResult<ClockConfirmation> {
        self.record(staff_id, device_id, attempt, EventKind::ClockIn, admin_override)
    }

    /// Records a clock-out event, with the same validation and override
    /// semantics as [`record_clock_in`](Self::record_clock_in).
    pub fn record_clock_out(
        &self,
        staff_id: i64,
        device_id: Option<i64>,
        attempt: NaiveDateTime,
        admin_override: Option<AdminOverride>,
    ) -> EngineResult<ClockConfirmation> {
        self.record(staff_id, device_id, attempt, EventKind::ClockOut, admin_override)
    }

    /// Returns true if the staff member has any shift rostered on
    /// `today`.
    pub fn has_roster_today(&self, staff_id: i64, today: NaiveDate) -> EngineResult<bool> {
        Ok(self.first_shift_on(staff_id, today)?.is_some())
    }

    /// Returns the staff member's next shift starting on or after
    /// `from_date`.
    pub fn next_scheduled_shift(
        &self,
        staff_id: i64,
        from_date: NaiveDate,
    ) -> EngineResult<Option<Shift>> {
        self.shifts
            .next_shift_for_staff(staff_id, start_of_day(from_date))
    }

    fn record(
        &self,
        staff_id: i64,
        device_id: Option<i64>,
        attempt: NaiveDateTime,
        kind: EventKind,
        admin_override: Option<AdminOverride>,
    ) -> EngineResult<ClockConfirmation> {
        if admin_override.is_none() {
            let result = if kind == EventKind::ClockIn {
                self.validate_clock_in(staff_id, attempt)?
            } else {
                self.validate_clock_out(staff_id, attempt)?
            };
            if !result.is_valid {
                return Err(EngineError::ValidationFailed {
                    code: result.validation_code,
                    message: result.message,
                });
            }
        }

        let (reason, admin_id) = match &admin_override {
            Some(authorization) => (
                Some(authorization.reason.clone()),
                Some(authorization.admin_id),
            ),
            None => (None, None),
        };
        let event = self.events.insert_event(NewClockEvent {
            staff_id,
            device_id,
            timestamp: attempt,
            kind,
            reason,
            admin_id,
        })?;

        let message = match &admin_override {
            Some(_) => format!(
                "{} recorded at {} (Admin Override)",
                action_label(kind),
                attempt.format("%H:%M")
            ),
            None => format!(
                "{} recorded at {}",
                action_label(kind),
                attempt.format("%H:%M")
            ),
        };

        self.log_clock_action(&event, admin_override.as_ref());
        Ok(ClockConfirmation { event, message })
    }

    fn first_shift_on(&self, staff_id: i64, date: NaiveDate) -> EngineResult<Option<Shift>> {
        Ok(self
            .shifts
            .shifts_for_staff_on(staff_id, date)?
            .into_iter()
            .next())
    }

    fn log_clock_action(&self, event: &ClockEvent, admin_override: Option<&AdminOverride>) {
        let action = if event.kind == EventKind::ClockIn {
            "CLOCK_IN"
        } else {
            "CLOCK_OUT"
        };
        let mut details = format!(
            "{}: Staff {}, Event {}, Time: {}",
            action_label(event.kind),
            event.staff_id,
            event.event_id,
            event.timestamp.format("%Y-%m-%d %H:%M"),
        );
        if let Some(authorization) = admin_override {
            details.push_str(&format!(
                ", Override by admin {}: {}",
                authorization.admin_id, authorization.reason
            ));
        }

        let actor_id = admin_override
            .map(|authorization| authorization.admin_id)
            .unwrap_or(event.staff_id);
        let record = AuditRecord::new(actor_id, action, "SUCCESS", details);
        if let Err(err) = self.audit.record(record) {
            warn!(actor_id, error = %err, "Failed to record clock audit entry");
        }
    }
}

/// Sentence-initial label for a clock action.
fn action_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::ClockIn => "Clock-in",
        EventKind::ClockOut => "Clock-out",
        EventKind::Break => "Break",
    }
}

fn window_result(
    shift: &Shift,
    kind: EventKind,
    attempt: NaiveDateTime,
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
) -> ValidationResult {
    let roster_info = format_roster_info(shift);
    if attempt >= earliest && attempt <= latest {
        ValidationResult::success(
            format!(
                "Valid {} time {} for scheduled shift {}-{}",
                kind,
                attempt.format("%H:%M"),
                shift.start_time.format("%H:%M"),
                shift.end_time.format("%H:%M")
            ),
            roster_info,
        )
    } else {
        ValidationResult::outside_window(
            format!(
                "{} time {} is outside allowed window ({} - {})",
                action_label(kind),
                attempt.format("%H:%M"),
                earliest.format("%H:%M"),
                latest.format("%H:%M")
            ),
            roster_info,
        )
    }
}

fn format_roster_info(shift: &Shift) -> String {
    format!(
        "Scheduled: {}-{} ({}h)",
        shift.start_time.format("%Y-%m-%d %H:%M"),
        shift.end_time.format("%H:%M"),
        shift.schedule_hours
    )
}
