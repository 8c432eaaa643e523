//! Error types for the Roster & Payroll Computation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur during roster management,
//! clock validation, and payroll computation.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::ValidationCode;

/// The main error type for the Roster & Payroll Computation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use farmtime_engine::error::EngineError;
///
/// let error = EngineError::StaffNotFound { staff_id: 42 };
/// assert_eq!(error.to_string(), "Staff not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An end timestamp at or before its start was supplied to a
    /// duration-based operation.
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        /// The start of the rejected interval.
        start: NaiveDateTime,
        /// The end of the rejected interval.
        end: NaiveDateTime,
    },

    /// A new or updated shift collides with an existing shift for the
    /// same staff member on the same calendar day.
    #[error("Shift overlaps an existing shift for staff {staff_id} ({start} - {end})")]
    OverlapConflict {
        /// The staff member the shift was proposed for.
        staff_id: i64,
        /// Proposed shift start.
        start: NaiveDateTime,
        /// Proposed shift end.
        end: NaiveDateTime,
    },

    /// The referenced staff member does not exist.
    #[error("Staff not found: {staff_id}")]
    StaffNotFound {
        /// The staff id that was not found.
        staff_id: i64,
    },

    /// The referenced shift does not exist.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift id that was not found.
        shift_id: i64,
    },

    /// The referenced payslip does not exist.
    #[error("Payslip not found: {payslip_id}")]
    PayslipNotFound {
        /// The payslip id that was not found.
        payslip_id: i64,
    },

    /// The caller lacks the role required for an admin-gated operation.
    #[error("Unauthorized: {action} requires the Admin role")]
    Unauthorized {
        /// The operation that was refused.
        action: String,
    },

    /// A roster-timing check rejected a clock attempt.
    #[error("Clock validation failed ({code}): {message}")]
    ValidationFailed {
        /// The validation outcome code (`NO_ROSTER` or `OUTSIDE_WINDOW`).
        code: ValidationCode,
        /// The human-readable validation message.
        message: String,
    },

    /// A payslip already exists for the staff member and week.
    ///
    /// Raised by the store's uniqueness index on `(staff_id, week_start)`.
    /// The payslip assembler translates this into returning the existing
    /// record, so callers of `create_payslip` never observe it.
    #[error("Payslip already exists for staff {staff_id}, week starting {week_start}")]
    AlreadyExists {
        /// The staff member the payslip belongs to.
        staff_id: i64,
        /// The Monday the payslip week starts on.
        week_start: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An unexpected persistence failure.
    #[error("Storage failure: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
