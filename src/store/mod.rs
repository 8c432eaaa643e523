//! Storage abstractions for the roster and payroll engine.
//!
//! This module defines the storage traits the service layer works
//! against, so different backends can be used interchangeably. The
//! engine ships with the in-memory [`MemoryStore`]; a database-backed
//! implementation only needs to provide the same traits.
//!
//! All operations are synchronous and return [`EngineResult`], with
//! backend failures surfaced as [`EngineError::Storage`](crate::error::EngineError::Storage).

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    ClockEvent, NewClockEvent, NewPayslip, NewShift, NewStaff, Payslip, Shift, Staff,
};

mod memory;

pub use memory::{MemoryAuditLog, MemoryStore};

/// Storage operations for staff records.
pub trait StaffStore: Send + Sync {
    /// Stores a new staff member and assigns their id.
    fn insert_staff(&self, staff: NewStaff) -> EngineResult<Staff>;

    /// Retrieves a staff member by id.
    fn staff_by_id(&self, staff_id: i64) -> EngineResult<Option<Staff>>;

    /// Lists all staff members, ordered by id.
    fn list_staff(&self) -> EngineResult<Vec<Staff>>;

    /// Replaces an existing staff record.
    ///
    /// Returns false if no staff member has the record's id.
    fn update_staff(&self, staff: &Staff) -> EngineResult<bool>;
}

/// Storage operations for shift assignments.
pub trait ShiftStore: Send + Sync {
    /// Stores a new shift and assigns its id.
    fn insert_shift(&self, shift: NewShift) -> EngineResult<Shift>;

    /// Retrieves a shift by id.
    fn shift_by_id(&self, shift_id: i64) -> EngineResult<Option<Shift>>;

    /// Lists a staff member's shifts that start on the given calendar day,
    /// ordered by start time.
    fn shifts_for_staff_on(&self, staff_id: i64, date: NaiveDate) -> EngineResult<Vec<Shift>>;

    /// Lists a staff member's shifts starting in `[from, to)`, ordered by
    /// start time.
    fn shifts_for_staff_between(
        &self,
        staff_id: i64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> EngineResult<Vec<Shift>>;

    /// Lists all shifts starting in `[from, to)`, ordered by start time.
    fn shifts_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> EngineResult<Vec<Shift>>;

    /// Retrieves a staff member's earliest shift starting at or after
    /// `from`.
    fn next_shift_for_staff(
        &self,
        staff_id: i64,
        from: NaiveDateTime,
    ) -> EngineResult<Option<Shift>>;

    /// Replaces an existing shift.
    ///
    /// Returns false if no shift has the record's id.
    fn update_shift(&self, shift: &Shift) -> EngineResult<bool>;

    /// Deletes a shift by id.
    ///
    /// Returns true if the shift existed.
    fn delete_shift(&self, shift_id: i64) -> EngineResult<bool>;
}

/// Storage operations for clock events.
pub trait EventStore: Send + Sync {
    /// Stores a new clock event and assigns its id.
    fn insert_event(&self, event: NewClockEvent) -> EngineResult<ClockEvent>;

    /// Lists a staff member's events with timestamps in `[from, to)`,
    /// ordered by timestamp.
    fn events_for_staff_between(
        &self,
        staff_id: i64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> EngineResult<Vec<ClockEvent>>;
}

/// Storage operations for payslips.
pub trait PayslipStore: Send + Sync {
    /// Stores a new payslip and assigns its id.
    ///
    /// Enforces one payslip per staff member per week: inserting a second
    /// payslip for the same `(staff_id, week_start_date)` fails with
    /// [`EngineError::AlreadyExists`](crate::error::EngineError::AlreadyExists).
    fn insert_payslip(&self, payslip: NewPayslip) -> EngineResult<Payslip>;

    /// Retrieves a payslip by id.
    fn payslip_by_id(&self, payslip_id: i64) -> EngineResult<Option<Payslip>>;

    /// Retrieves a staff member's payslip for the week starting on
    /// `week_start`.
    fn payslip_for_week(
        &self,
        staff_id: i64,
        week_start: NaiveDate,
    ) -> EngineResult<Option<Payslip>>;

    /// Lists a staff member's payslips, most recent week first.
    fn payslips_for_staff(&self, staff_id: i64) -> EngineResult<Vec<Payslip>>;

    /// Deletes a payslip by id.
    ///
    /// Returns true if the payslip existed.
    fn delete_payslip(&self, payslip_id: i64) -> EngineResult<bool>;
}

/// A single entry in the administrative audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// When the action happened (UTC).
    pub timestamp: NaiveDateTime,
    /// The staff id of the caller who performed the action.
    pub actor_id: i64,
    /// What was done, e.g. "ROSTER_CREATE".
    pub action: String,
    /// How it ended, e.g. "SUCCESS".
    pub outcome: String,
    /// Free-form context for the action.
    pub details: String,
}

impl AuditRecord {
    /// Builds a record stamped with a fresh id and the current time.
    pub fn new(
        actor_id: i64,
        action: impl Into<String>,
        outcome: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now().naive_utc(),
            actor_id,
            action: action.into(),
            outcome: outcome.into(),
            details: details.into(),
        }
    }
}

/// Sink for audit records.
///
/// Services treat a failed append as non-fatal: the error is logged via
/// `tracing` and the primary operation still succeeds.
pub trait AuditLog: Send + Sync {
    /// Appends a record to the trail.
    fn record(&self, record: AuditRecord) -> EngineResult<()>;
}
