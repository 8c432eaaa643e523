//! Roster management: shift assignment, overlap prevention, and
//! worker-facing roster views.
//!
//! Mutations are admin-gated and validated before anything is written:
//! the interval must be well formed, the scheduled hours are derived
//! rather than supplied, and the shift must not overlap another shift
//! for the same staff member on the same calendar day. Every successful
//! mutation emits an audit record on a best-effort basis.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::calculation::{WeekWindow, calculate_scheduled_hours, find_conflict, start_of_day};
use crate::error::{EngineError, EngineResult};
use crate::models::{Caller, NewShift, Shift};
use crate::store::{AuditLog, AuditRecord, ShiftStore};

use super::require_admin;

/// How many weeks ahead the upcoming-shifts view covers by default.
pub const DEFAULT_WEEKS_AHEAD: u32 = 4;

/// Manages shift assignments against the roster.
pub struct RosterService {
    shifts: Arc<dyn ShiftStore>,
    audit: Arc<dyn AuditLog>,
}

impl RosterService {
    /// Creates a roster service over the given shift store and audit sink.
    pub fn new(shifts: Arc<dyn ShiftStore>, audit: Arc<dyn AuditLog>) -> Self {
        Self { shifts, audit }
    }

    /// Assigns a new shift to a staff member.
    ///
    /// The scheduled hours are computed from the interval, not supplied
    /// by the caller.
    ///
    /// # Arguments
    ///
    /// * `caller` - The identity performing the assignment (must be Admin)
    /// * `staff_id` - The staff member receiving the shift
    /// * `start_time` - Scheduled start
    /// * `end_time` - Scheduled end
    ///
    /// # Returns
    ///
    /// The stored shift, or `Unauthorized` for non-admin callers,
    /// `InvalidInterval` when the end is not after the start, and
    /// `OverlapConflict` when the shift collides with an existing one
    /// on the same day.
    pub fn assign_shift(
        &self,
        caller: &Caller,
        staff_id: i64,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> EngineResult<Shift> {
        require_admin(caller, "assigning shifts")?;

        let schedule_hours = calculate_scheduled_hours(start_time, end_time)?;
        self.ensure_no_overlap(staff_id, start_time, end_time, None)?;

        let shift = self.shifts.insert_shift(NewShift {
            staff_id,
            start_time,
            end_time,
            schedule_hours,
        })?;

        self.log_roster_action(caller.staff_id, "create", &shift);
        Ok(shift)
    }

    /// Replaces an existing shift with new times, re-validating overlap
    /// against every other shift of the (possibly reassigned) staff
    /// member.
    pub fn update_shift(
        &self,
        caller: &Caller,
        shift_id: i64,
        staff_id: i64,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> EngineResult<Shift> {
        require_admin(caller, "updating shifts")?;

        let schedule_hours = calculate_scheduled_hours(start_time, end_time)?;
        self.ensure_no_overlap(staff_id, start_time, end_time, Some(shift_id))?;

        let shift = Shift {
            shift_id,
            staff_id,
            start_time,
            end_time,
            schedule_hours,
        };
        if !self.shifts.update_shift(&shift)? {
            return Err(EngineError::ShiftNotFound { shift_id });
        }

        self.log_roster_action(caller.staff_id, "update", &shift);
        Ok(shift)
    }

    /// Deletes a shift and returns the removed record.
    pub fn delete_shift(&self, caller: &Caller, shift_id: i64) -> EngineResult<Shift> {
        require_admin(caller, "deleting shifts")?;

        let shift = self
            .shifts
            .shift_by_id(shift_id)?
            .ok_or(EngineError::ShiftNotFound { shift_id })?;
        if !self.shifts.delete_shift(shift_id)? {
            return Err(EngineError::ShiftNotFound { shift_id });
        }

        self.log_roster_action(caller.staff_id, "delete", &shift);
        Ok(shift)
    }

    /// Returns true if `[start, end)` collides with another shift for
    /// `staff_id` on the calendar day of `start`.
    ///
    /// `exclude_shift_id` skips one shift, so an update does not collide
    /// with its own stored slot.
    pub fn has_overlap(
        &self,
        staff_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude_shift_id: Option<i64>,
    ) -> EngineResult<bool> {
        let candidates = self.shifts.shifts_for_staff_on(staff_id, start.date())?;
        Ok(find_conflict(&candidates, start, end, exclude_shift_id).is_some())
    }

    /// Lists a staff member's shifts in the Monday-aligned week
    /// containing `anchor`, ordered by start time.
    pub fn shifts_for_week(&self, staff_id: i64, anchor: NaiveDate) -> EngineResult<Vec<Shift>> {
        let (from, to) = WeekWindow::containing(anchor).datetime_range();
        self.shifts.shifts_for_staff_between(staff_id, from, to)
    }

    /// Lists every staff member's shifts in the Monday-aligned week
    /// containing `anchor`, ordered by start time.
    pub fn roster_for_week(&self, anchor: NaiveDate) -> EngineResult<Vec<Shift>> {
        let (from, to) = WeekWindow::containing(anchor).datetime_range();
        self.shifts.shifts_between(from, to)
    }

    /// Lists a staff member's shifts from `from_date` through
    /// `weeks_ahead` further weeks, end date included.
    pub fn upcoming_shifts(
        &self,
        staff_id: i64,
        from_date: NaiveDate,
        weeks_ahead: u32,
    ) -> EngineResult<Vec<Shift>> {
        let from = start_of_day(from_date);
        let to = start_of_day(from_date + Duration::days(i64::from(weeks_ahead) * 7 + 1));
        self.shifts.shifts_for_staff_between(staff_id, from, to)
    }

    /// Checks that `caller` may view the roster of `staff_id`.
    ///
    /// Admins may view any roster; workers only their own.
    pub fn authorize_roster_view(&self, caller: &Caller, staff_id: i64) -> EngineResult<()> {
        if caller.is_admin() || caller.staff_id == staff_id {
            return Ok(());
        }
        Err(EngineError::Unauthorized {
            action: "viewing another staff member's roster".to_string(),
        })
    }

    fn ensure_no_overlap(
        &self,
        staff_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude_shift_id: Option<i64>,
    ) -> EngineResult<()> {
        if self.has_overlap(staff_id, start, end, exclude_shift_id)? {
            return Err(EngineError::OverlapConflict {
                staff_id,
                start,
                end,
            });
        }
        Ok(())
    }

    fn log_roster_action(&self, actor_id: i64, verb: &str, shift: &Shift) {
        let details = format!(
            "Roster {}: Staff {}, Schedule {}, Start: {}, End: {}, Hours: {}",
            verb,
            shift.staff_id,
            shift.shift_id,
            shift.start_time.format("%Y-%m-%d %H:%M"),
            shift.end_time.format("%Y-%m-%d %H:%M"),
            shift.schedule_hours,
        );
        let action = format!("ROSTER_{}", verb.to_uppercase());
        let record = AuditRecord::new(actor_id, action, "SUCCESS", details);
        if let Err(err) = self.audit.record(record) {
            warn!(actor_id, error = %err, "Failed to record roster audit entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::{MemoryAuditLog, MemoryStore};
    use chrono::NaiveDate;

    fn make_datetime(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn admin() -> Caller {
        Caller::new(1, Role::Admin)
    }

    fn worker(staff_id: i64) -> Caller {
        Caller::new(staff_id, Role::Worker)
    }

    fn service() -> (RosterService, Arc<MemoryStore>, Arc<MemoryAuditLog>) {
        let store = Arc::new(MemoryStore::new());
        let audit = Arc::new(MemoryAuditLog::new());
        let service = RosterService::new(store.clone(), audit.clone());
        (service, store, audit)
    }

    struct FailingAuditLog;

    impl AuditLog for FailingAuditLog {
        fn record(&self, _record: AuditRecord) -> EngineResult<()> {
            Err(EngineError::Storage {
                message: "audit sink offline".to_string(),
            })
        }
    }

    // ==========================================================================
    // RS-001: admin assigns a shift with derived hours and an audit entry
    // ==========================================================================
    #[test]
    fn test_rs_001_admin_assigns_shift() {
        let (service, _, audit) = service();

        let shift = service
            .assign_shift(&admin(), 7, make_datetime(6, 9, 0), make_datetime(6, 17, 0))
            .unwrap();

        assert_eq!(shift.shift_id, 1);
        assert_eq!(shift.staff_id, 7);
        assert_eq!(shift.schedule_hours, 8);

        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "ROSTER_CREATE");
        assert_eq!(records[0].outcome, "SUCCESS");
        assert_eq!(records[0].actor_id, 1);
        assert!(records[0].details.starts_with("Roster create: Staff 7, Schedule 1"));
        assert!(records[0].details.contains("Start: 2025-01-06 09:00"));
        assert!(records[0].details.contains("Hours: 8"));
    }

    // ==========================================================================
    // RS-002: workers cannot assign shifts
    // ==========================================================================
    #[test]
    fn test_rs_002_worker_cannot_assign_shift() {
        let (service, store, audit) = service();

        let result =
            service.assign_shift(&worker(7), 7, make_datetime(6, 9, 0), make_datetime(6, 17, 0));

        assert!(matches!(result, Err(EngineError::Unauthorized { .. })));
        assert!(store.shifts_for_staff_on(7, date(6)).unwrap().is_empty());
        assert!(audit.records().is_empty());
    }

    // ==========================================================================
    // RS-003: an inverted interval is rejected before any store write
    // ==========================================================================
    #[test]
    fn test_rs_003_assign_rejects_inverted_interval() {
        let (service, store, _) = service();

        let result =
            service.assign_shift(&admin(), 7, make_datetime(6, 17, 0), make_datetime(6, 9, 0));

        assert!(matches!(result, Err(EngineError::InvalidInterval { .. })));
        assert!(store.shifts_for_staff_on(7, date(6)).unwrap().is_empty());
    }

    // ==========================================================================
    // RS-004: a colliding shift on the same day is rejected
    // ==========================================================================
    #[test]
    fn test_rs_004_assign_rejects_overlap() {
        let (service, _, _) = service();
        service
            .assign_shift(&admin(), 7, make_datetime(6, 9, 0), make_datetime(6, 17, 0))
            .unwrap();

        let result =
            service.assign_shift(&admin(), 7, make_datetime(6, 16, 0), make_datetime(6, 20, 0));

        assert!(matches!(
            result,
            Err(EngineError::OverlapConflict { staff_id: 7, .. })
        ));
    }

    // ==========================================================================
    // RS-005: back-to-back shifts do not overlap
    // ==========================================================================
    #[test]
    fn test_rs_005_back_to_back_shifts_are_allowed() {
        let (service, _, _) = service();
        service
            .assign_shift(&admin(), 7, make_datetime(6, 9, 0), make_datetime(6, 13, 0))
            .unwrap();

        let second = service
            .assign_shift(&admin(), 7, make_datetime(6, 13, 0), make_datetime(6, 17, 0))
            .unwrap();

        assert_eq!(second.schedule_hours, 4);
    }

    // ==========================================================================
    // RS-006: an update may keep or shrink its own slot
    // ==========================================================================
    #[test]
    fn test_rs_006_update_excludes_own_slot_from_overlap() {
        let (service, _, audit) = service();
        let shift = service
            .assign_shift(&admin(), 7, make_datetime(6, 9, 0), make_datetime(6, 17, 0))
            .unwrap();

        let updated = service
            .update_shift(
                &admin(),
                shift.shift_id,
                7,
                make_datetime(6, 10, 0),
                make_datetime(6, 18, 0),
            )
            .unwrap();

        assert_eq!(updated.start_time, make_datetime(6, 10, 0));
        assert_eq!(updated.schedule_hours, 8);
        assert_eq!(audit.records().last().unwrap().action, "ROSTER_UPDATE");
    }

    // ==========================================================================
    // RS-007: an update may not collide with a different shift
    // ==========================================================================
    #[test]
    fn test_rs_007_update_rejects_overlap_with_other_shift() {
        let (service, _, _) = service();
        service
            .assign_shift(&admin(), 7, make_datetime(6, 9, 0), make_datetime(6, 13, 0))
            .unwrap();
        let second = service
            .assign_shift(&admin(), 7, make_datetime(6, 14, 0), make_datetime(6, 18, 0))
            .unwrap();

        let result = service.update_shift(
            &admin(),
            second.shift_id,
            7,
            make_datetime(6, 12, 0),
            make_datetime(6, 16, 0),
        );

        assert!(matches!(result, Err(EngineError::OverlapConflict { .. })));
    }

    // ==========================================================================
    // RS-008: updating an absent shift is reported as not found
    // ==========================================================================
    #[test]
    fn test_rs_008_update_missing_shift() {
        let (service, _, _) = service();

        let result = service.update_shift(
            &admin(),
            99,
            7,
            make_datetime(6, 9, 0),
            make_datetime(6, 17, 0),
        );

        assert!(matches!(
            result,
            Err(EngineError::ShiftNotFound { shift_id: 99 })
        ));
    }

    // ==========================================================================
    // RS-009: delete returns the removed shift and audits the action
    // ==========================================================================
    #[test]
    fn test_rs_009_delete_shift() {
        let (service, store, audit) = service();
        let shift = service
            .assign_shift(&admin(), 7, make_datetime(6, 9, 0), make_datetime(6, 17, 0))
            .unwrap();

        let deleted = service.delete_shift(&admin(), shift.shift_id).unwrap();

        assert_eq!(deleted.shift_id, shift.shift_id);
        assert!(store.shift_by_id(shift.shift_id).unwrap().is_none());
        assert_eq!(audit.records().last().unwrap().action, "ROSTER_DELETE");

        let missing = service.delete_shift(&admin(), shift.shift_id);
        assert!(matches!(missing, Err(EngineError::ShiftNotFound { .. })));

        let denied = service.delete_shift(&worker(7), 1);
        assert!(matches!(denied, Err(EngineError::Unauthorized { .. })));
    }

    // ==========================================================================
    // RS-010: the week view covers Monday through Sunday only
    // ==========================================================================
    #[test]
    fn test_rs_010_shifts_for_week_is_monday_aligned() {
        let (service, _, _) = service();
        // 2025-01-06 is a Monday, 2025-01-12 a Sunday, 2025-01-13 the next Monday.
        for day in [6, 12, 13] {
            service
                .assign_shift(&admin(), 7, make_datetime(day, 9, 0), make_datetime(day, 17, 0))
                .unwrap();
        }

        let week = service.shifts_for_week(7, date(8)).unwrap();

        assert_eq!(week.len(), 2);
        assert_eq!(week[0].start_time, make_datetime(6, 9, 0));
        assert_eq!(week[1].start_time, make_datetime(12, 9, 0));
    }

    // ==========================================================================
    // RS-011: the upcoming view runs from the given day through the final
    // week's end date inclusive
    // ==========================================================================
    #[test]
    fn test_rs_011_upcoming_shifts_window() {
        let (service, _, _) = service();
        let before = (make_datetime(3, 9, 0), make_datetime(3, 17, 0));
        let first = (make_datetime(6, 9, 0), make_datetime(6, 17, 0));
        // From 2025-01-06, four weeks ahead covers start times before
        // 2025-02-04 00:00.
        let last_included = (
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap().and_hms_opt(23, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 4).unwrap().and_hms_opt(7, 0, 0).unwrap(),
        );
        let excluded = (
            NaiveDate::from_ymd_opt(2025, 2, 4).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 4).unwrap().and_hms_opt(17, 0, 0).unwrap(),
        );
        for (start, end) in [before, first, last_included, excluded] {
            service.assign_shift(&admin(), 7, start, end).unwrap();
        }

        let upcoming = service
            .upcoming_shifts(7, date(6), DEFAULT_WEEKS_AHEAD)
            .unwrap();

        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].start_time, first.0);
        assert_eq!(upcoming[1].start_time, last_included.0);
    }

    // ==========================================================================
    // RS-012: admins may view any roster, workers only their own
    // ==========================================================================
    #[test]
    fn test_rs_012_roster_view_authorization() {
        let (service, _, _) = service();

        assert!(service.authorize_roster_view(&admin(), 7).is_ok());
        assert!(service.authorize_roster_view(&worker(7), 7).is_ok());

        let denied = service.authorize_roster_view(&worker(7), 8).unwrap_err();
        assert!(matches!(denied, EngineError::Unauthorized { .. }));
        assert_eq!(
            denied.to_string(),
            "Unauthorized: viewing another staff member's roster requires the Admin role"
        );
    }

    // ==========================================================================
    // RS-013: a failing audit sink never fails the mutation
    // ==========================================================================
    #[test]
    fn test_rs_013_audit_failure_does_not_block_mutation() {
        let store = Arc::new(MemoryStore::new());
        let service = RosterService::new(store.clone(), Arc::new(FailingAuditLog));

        let shift = service
            .assign_shift(&admin(), 7, make_datetime(6, 9, 0), make_datetime(6, 17, 0))
            .unwrap();

        assert!(store.shift_by_id(shift.shift_id).unwrap().is_some());
    }

    // ==========================================================================
    // RS-014: the all-staff week roster merges every staff member's shifts
    // ==========================================================================
    #[test]
    fn test_rs_014_roster_for_week_covers_all_staff() {
        let (service, _, _) = service();
        service
            .assign_shift(&admin(), 7, make_datetime(6, 9, 0), make_datetime(6, 17, 0))
            .unwrap();
        service
            .assign_shift(&admin(), 8, make_datetime(7, 6, 0), make_datetime(7, 14, 0))
            .unwrap();
        service
            .assign_shift(&admin(), 7, make_datetime(13, 9, 0), make_datetime(13, 17, 0))
            .unwrap();

        let roster = service.roster_for_week(date(8)).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].staff_id, 7);
        assert_eq!(roster[1].staff_id, 8);
    }
}
