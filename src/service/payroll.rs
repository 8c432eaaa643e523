//! Payroll computation and payslip assembly.
//!
//! The weekly pipeline reconciles clock events into per-day hours,
//! classifies them into pay categories, prices the week at the staff
//! member's standard rate, and applies PAYG withholding and employer
//! superannuation. `create_payslip` persists the result once per staff
//! member per week; creating again for the same week returns the
//! existing record. The special variant covers an arbitrary date range
//! at a caller-supplied rate, normalising gross pay to a weekly
//! equivalent for the tax formula. Summaries can also be priced at the
//! award default rate for the staff member's role and contract type
//! instead of their stored rate.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::warn;

use crate::calculation::{
    WeekWindow, annual_tax, assess, classify_week, reconcile_range, reconcile_week, start_of_day,
};
use crate::config::EngineRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{Caller, NewPayslip, Payslip, PayrollSummary, Staff, WeeklyHours};
use crate::store::{AuditLog, AuditRecord, EventStore, PayslipStore, StaffStore};

use super::require_admin;

/// Computes weekly payroll and manages persisted payslips.
pub struct PayrollService {
    staff: Arc<dyn StaffStore>,
    events: Arc<dyn EventStore>,
    payslips: Arc<dyn PayslipStore>,
    audit: Arc<dyn AuditLog>,
    rules: Arc<EngineRules>,
}

impl PayrollService {
    /// Creates a payroll service over the given stores, audit sink, and
    /// rules.
    pub fn new(
        staff: Arc<dyn StaffStore>,
        events: Arc<dyn EventStore>,
        payslips: Arc<dyn PayslipStore>,
        audit: Arc<dyn AuditLog>,
        rules: Arc<EngineRules>,
    ) -> Self {
        Self {
            staff,
            events,
            payslips,
            audit,
            rules,
        }
    }

    /// Reconciles a staff member's clock events for the Monday-aligned
    /// week containing `reference_date`.
    pub fn reconcile_week(
        &self,
        staff_id: i64,
        reference_date: NaiveDate,
    ) -> EngineResult<WeeklyHours> {
        let week = WeekWindow::containing(reference_date);
        let (from, to) = week.datetime_range();
        let events = self.events.events_for_staff_between(staff_id, from, to)?;
        Ok(reconcile_week(week, &events, &self.rules.reconciliation))
    }

    /// Computes a full weekly payroll result without persisting anything.
    ///
    /// # Arguments
    ///
    /// * `staff_id` - The staff member to compute for
    /// * `reference_date` - Any date inside the week of interest
    ///
    /// # Returns
    ///
    /// A [`PayrollSummary`] with reconciled hours, classified pay lines,
    /// gross pay, withholding, and superannuation, or `StaffNotFound`.
    pub fn weekly_summary(
        &self,
        staff_id: i64,
        reference_date: NaiveDate,
    ) -> EngineResult<PayrollSummary> {
        let staff = self.resolve_staff(staff_id)?;
        let rate = staff.standard_pay_rate;
        self.summarize_at_rate(&staff, rate, reference_date)
    }

    /// Computes the weekly summary priced at the award default rate for
    /// the staff member's role and contract type instead of their stored
    /// rate.
    ///
    /// A role and contract combination missing from the rules' default
    /// table falls back to the stored rate. Nothing is persisted.
    pub fn weekly_summary_at_default_rate(
        &self,
        staff_id: i64,
        reference_date: NaiveDate,
    ) -> EngineResult<PayrollSummary> {
        let staff = self.resolve_staff(staff_id)?;
        let rate = self
            .rules
            .default_rate(staff.role, staff.contract_type)
            .unwrap_or(staff.standard_pay_rate);
        self.summarize_at_rate(&staff, rate, reference_date)
    }

    fn summarize_at_rate(
        &self,
        staff: &Staff,
        standard_pay_rate: Decimal,
        reference_date: NaiveDate,
    ) -> EngineResult<PayrollSummary> {
        let week = WeekWindow::containing(reference_date);
        let weekly = self.reconcile_week(staff.staff_id, reference_date)?;
        let classification = classify_week(&weekly.days, standard_pay_rate, &self.rules.overtime);
        let assessment = assess(
            classification.gross_pay,
            &self.rules.tax,
            &self.rules.superannuation,
        );

        Ok(PayrollSummary {
            staff_id: staff.staff_id,
            staff_name: staff.full_name(),
            week_start_date: week.start(),
            standard_pay_rate,
            total_hours_worked: weekly.total_hours(),
            components: classification.components,
            pay_lines: classification.pay_lines,
            gross_weekly_pay: assessment.gross_weekly_pay,
            annual_income: assessment.annual_income,
            annual_tax: assessment.annual_tax,
            weekly_payg: assessment.weekly_payg,
            net_pay: assessment.net_pay,
            employer_superannuation: assessment.employer_superannuation,
        })
    }

    /// Creates the payslip for the week containing `reference_date`, or
    /// returns the existing one.
    ///
    /// The week is reconciled and classified at the staff member's
    /// stored standard rate. Creation is idempotent per `(staff, week)`:
    /// an existing payslip is returned unchanged, and a concurrent
    /// creation losing the store's uniqueness race is resolved the same
    /// way.
    pub fn create_payslip(
        &self,
        staff_id: i64,
        reference_date: NaiveDate,
    ) -> EngineResult<Payslip> {
        let staff = self.resolve_staff(staff_id)?;
        let week = WeekWindow::containing(reference_date);
        let weekly = self.reconcile_week(staff_id, reference_date)?;
        let classification =
            classify_week(&weekly.days, staff.standard_pay_rate, &self.rules.overtime);

        let week_start = week.start();
        if let Some(existing) = self.payslips.payslip_for_week(staff_id, week_start)? {
            return Ok(existing);
        }

        let assessment = assess(
            classification.gross_pay,
            &self.rules.tax,
            &self.rules.superannuation,
        );
        let new_payslip = NewPayslip {
            staff_id,
            standard_pay_rate: staff.standard_pay_rate,
            week_start_date: week_start,
            total_hours_worked: weekly.total_hours(),
            gross_weekly_pay: assessment.gross_weekly_pay,
            annual_income: assessment.annual_income,
            annual_tax: assessment.annual_tax,
            weekly_payg: assessment.weekly_payg,
            net_pay: assessment.net_pay,
            employer_superannuation: assessment.employer_superannuation,
        };

        match self.payslips.insert_payslip(new_payslip) {
            Ok(payslip) => {
                self.log_payslip_action(staff_id, "create", &payslip);
                Ok(payslip)
            }
            Err(EngineError::AlreadyExists { .. }) => self
                .payslips
                .payslip_for_week(staff_id, week_start)?
                .ok_or_else(|| EngineError::Storage {
                    message: format!(
                        "payslip for staff {} week {} vanished after uniqueness conflict",
                        staff_id, week_start
                    ),
                }),
            Err(err) => Err(err),
        }
    }

    /// Creates a payslip for an arbitrary date range at a caller-supplied
    /// rate.
    ///
    /// Hours are reconciled over `[date_start, date_end]` inclusive and
    /// priced flat at `standard_pay_rate`, with no overtime
    /// classification. Gross pay is normalised to a weekly equivalent
    /// (times seven over the days in the period) before the tax formula,
    /// and the weekly withholding is prorated back over the period for
    /// net pay. Superannuation applies to the full period gross.
    ///
    /// Unlike [`create_payslip`](Self::create_payslip) there is no
    /// return-existing idempotency; the stored record keys its week start
    /// to `date_start` as given, and a direct collision with an existing
    /// payslip on `(staff, date_start)` surfaces the store's
    /// `AlreadyExists`.
    pub fn create_payslip_special(
        &self,
        staff_id: i64,
        standard_pay_rate: Decimal,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> EngineResult<Payslip> {
        if date_end < date_start {
            return Err(EngineError::InvalidInterval {
                start: start_of_day(date_start),
                end: start_of_day(date_end),
            });
        }
        self.resolve_staff(staff_id)?;

        let from = start_of_day(date_start);
        let to = start_of_day(date_end + Duration::days(1));
        let events = self.events.events_for_staff_between(staff_id, from, to)?;
        let range = reconcile_range(date_start, date_end, &events, &self.rules.reconciliation);
        let total_hours = range.total_hours();
        let gross_pay = total_hours * standard_pay_rate;

        let days_in_period = Decimal::from((date_end - date_start).num_days() + 1);
        let seven = Decimal::from(7);
        let weeks = Decimal::from(self.rules.tax.weeks_per_year);
        let weekly_equivalent = gross_pay * seven / days_in_period;
        let annual_income = weekly_equivalent * weeks;
        let annual_tax_owed = annual_tax(annual_income, &self.rules.tax);
        let weekly_payg = annual_tax_owed / weeks;
        let net_pay = gross_pay - weekly_payg * days_in_period / seven;
        let employer_superannuation = gross_pay * self.rules.superannuation.sg_rate;

        let payslip = self.payslips.insert_payslip(NewPayslip {
            staff_id,
            standard_pay_rate,
            week_start_date: date_start,
            total_hours_worked: total_hours,
            gross_weekly_pay: gross_pay,
            annual_income,
            annual_tax: annual_tax_owed,
            weekly_payg,
            net_pay,
            employer_superannuation,
        })?;
        self.log_payslip_action(staff_id, "create", &payslip);
        Ok(payslip)
    }

    /// Deletes a payslip and returns the removed record.
    pub fn delete_payslip(&self, caller: &Caller, payslip_id: i64) -> EngineResult<Payslip> {
        require_admin(caller, "deleting payslips")?;

        let payslip = self
            .payslips
            .payslip_by_id(payslip_id)?
            .ok_or(EngineError::PayslipNotFound { payslip_id })?;
        if !self.payslips.delete_payslip(payslip_id)? {
            return Err(EngineError::PayslipNotFound { payslip_id });
        }

        self.log_payslip_action(caller.staff_id, "delete", &payslip);
        Ok(payslip)
    }

    /// Lists a staff member's payslips, most recent week first.
    pub fn payslips_for_staff(&self, staff_id: i64) -> EngineResult<Vec<Payslip>> {
        self.payslips.payslips_for_staff(staff_id)
    }

    fn resolve_staff(&self, staff_id: i64) -> EngineResult<Staff> {
        self.staff
            .staff_by_id(staff_id)?
            .ok_or(EngineError::StaffNotFound { staff_id })
    }

    fn log_payslip_action(&self, actor_id: i64, verb: &str, payslip: &Payslip) {
        let details = format!(
            "Payslip {}: Staff {}, Payslip {}, Week: {}, Gross: {}, Net: {}",
            verb,
            payslip.staff_id,
            payslip.payslip_id,
            payslip.week_start_date,
            payslip.gross_weekly_pay,
            payslip.net_pay,
        );
        let action = format!("PAYSLIP_{}", verb.to_uppercase());
        let record = AuditRecord::new(actor_id, action, "SUCCESS", details);
        if let Err(err) = self.audit.record(record) {
            warn!(actor_id, error = %err, "Failed to record payslip audit entry");
        }
    }
}
