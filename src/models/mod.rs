//! Core data models for the roster and payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock_event;
mod pay_components;
mod payslip;
mod shift;
mod staff;
mod validation;

pub use clock_event::{AdminOverride, ClockEvent, EventKind, NewClockEvent};
pub use pay_components::{
    DayHours, PayCategory, PayComponents, PayLine, ReconciliationAnomaly, WeeklyHours,
};
pub use payslip::{NewPayslip, Payslip, PayrollSummary};
pub use shift::{NewShift, Shift};
pub use staff::{Caller, ContractType, NewStaff, Role, Staff};
pub use validation::{ValidationCode, ValidationResult};
