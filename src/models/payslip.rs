//! Payslip models.
//!
//! This module defines the persisted Payslip record, the NewPayslip input,
//! and the compute-only PayrollSummary used for payroll preview.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayComponents, PayLine};

/// A persisted weekly payslip.
///
/// Invariant: at most one payslip exists per `(staff_id, week_start_date)`
/// under normal creation; idempotent creation returns the existing record.
/// Payslips are never mutated after creation and are deleted explicitly
/// by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip, assigned by the store.
    pub payslip_id: i64,
    /// The staff member the payslip belongs to.
    pub staff_id: i64,
    /// The base hourly rate the payslip was computed with.
    pub standard_pay_rate: Decimal,
    /// The Monday the pay week starts on. For special-range payslips this
    /// is the start of the requested period.
    pub week_start_date: NaiveDate,
    /// Total reconciled hours across the period.
    pub total_hours_worked: Decimal,
    /// Gross pay for the week before withholding.
    pub gross_weekly_pay: Decimal,
    /// Annualized income (weekly-equivalent gross times 52).
    pub annual_income: Decimal,
    /// Progressive income tax on the annualized income.
    pub annual_tax: Decimal,
    /// The weekly Pay-As-You-Go withholding amount.
    pub weekly_payg: Decimal,
    /// Pay after withholding.
    pub net_pay: Decimal,
    /// Employer superannuation guarantee contribution.
    pub employer_superannuation: Decimal,
    /// When the payslip record was created.
    pub date_created: NaiveDateTime,
}

/// Input for persisting a new payslip; the store assigns the id and
/// creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayslip {
    /// The staff member the payslip belongs to.
    pub staff_id: i64,
    /// The base hourly rate the payslip was computed with.
    pub standard_pay_rate: Decimal,
    /// The Monday the pay week starts on (or the period start for
    /// special-range payslips).
    pub week_start_date: NaiveDate,
    /// Total reconciled hours across the period.
    pub total_hours_worked: Decimal,
    /// Gross pay before withholding.
    pub gross_weekly_pay: Decimal,
    /// Annualized income.
    pub annual_income: Decimal,
    /// Progressive income tax on the annualized income.
    pub annual_tax: Decimal,
    /// The weekly Pay-As-You-Go withholding amount.
    pub weekly_payg: Decimal,
    /// Pay after withholding.
    pub net_pay: Decimal,
    /// Employer superannuation guarantee contribution.
    pub employer_superannuation: Decimal,
}

/// A compute-only weekly payroll result, produced without persisting.
///
/// Carries the same figures as a payslip plus the classified hour buckets
/// and priced pay lines, for preview ahead of payslip creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The staff member the summary is for.
    pub staff_id: i64,
    /// The staff member's display name.
    pub staff_name: String,
    /// The Monday the pay week starts on.
    pub week_start_date: NaiveDate,
    /// The base hourly rate used.
    pub standard_pay_rate: Decimal,
    /// Total reconciled hours across the week.
    pub total_hours_worked: Decimal,
    /// The classified hour buckets.
    pub components: PayComponents,
    /// The priced lines making up gross pay.
    pub pay_lines: Vec<PayLine>,
    /// Gross pay for the week before withholding.
    pub gross_weekly_pay: Decimal,
    /// Annualized income.
    pub annual_income: Decimal,
    /// Progressive income tax on the annualized income.
    pub annual_tax: Decimal,
    /// The weekly Pay-As-You-Go withholding amount.
    pub weekly_payg: Decimal,
    /// Pay after withholding.
    pub net_pay: Decimal,
    /// Employer superannuation guarantee contribution.
    pub employer_superannuation: Decimal,
}
