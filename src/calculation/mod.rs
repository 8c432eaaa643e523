//! Calculation logic for the roster and payroll engine.
//!
//! This module contains the pure calculation functions behind rostering
//! and payroll, including the canonical Monday week anchor, scheduled
//! hours rounding, shift overlap detection, clock event reconciliation
//! into per-day worked hours, weekly overtime classification with
//! weekend and tiered weekly rates, and PAYG withholding with employer
//! superannuation. Nothing in here touches storage; the service layer
//! feeds these functions and persists their results.

mod overlap;
mod overtime;
mod reconciliation;
mod scheduled_hours;
mod tax;
mod week;

pub use overlap::{find_conflict, intervals_overlap};
pub use overtime::{WeeklyClassification, classify_week};
pub use reconciliation::{
    DayReconciliation, RangeReconciliation, reconcile_day, reconcile_range, reconcile_week,
};
pub use scheduled_hours::calculate_scheduled_hours;
pub use tax::{TaxAssessment, annual_tax, assess};
pub use week::{WeekWindow, monday_of_week, start_of_day};
