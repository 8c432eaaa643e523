//! Configuration types for rostering and payroll rules.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from a YAML configuration file. Every section has a
//! `Default` carrying the statutory values the engine ships with, so a
//! configuration file only needs to state what it overrides.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{ContractType, Role};

/// Overtime thresholds and pay multipliers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OvertimeRules {
    /// Weekday hours beyond this count in a single day are daily overtime.
    pub daily_overtime_threshold_hours: Decimal,
    /// Weekday hours beyond this count in a week are weekly overtime.
    pub standard_weekly_hours: Decimal,
    /// How much of the weekly excess is paid at the tier-1 multiplier.
    pub weekly_overtime_tier1_span_hours: Decimal,
    /// Multiplier for daily overtime hours.
    pub daily_overtime_multiplier: Decimal,
    /// Multiplier for the first span of weekly overtime.
    pub weekly_overtime_tier1_multiplier: Decimal,
    /// Multiplier for weekly overtime beyond the tier-1 span.
    pub weekly_overtime_tier2_multiplier: Decimal,
    /// Multiplier for Saturday and Sunday hours.
    pub weekend_multiplier: Decimal,
}

impl Default for OvertimeRules {
    fn default() -> Self {
        Self {
            daily_overtime_threshold_hours: Decimal::from_parts(8, 0, 0, false, 0),
            standard_weekly_hours: Decimal::from_parts(38, 0, 0, false, 0),
            weekly_overtime_tier1_span_hours: Decimal::from_parts(2, 0, 0, false, 0),
            daily_overtime_multiplier: Decimal::from_parts(15, 0, 0, false, 1),
            weekly_overtime_tier1_multiplier: Decimal::from_parts(15, 0, 0, false, 1),
            weekly_overtime_tier2_multiplier: Decimal::from_parts(20, 0, 0, false, 1),
            weekend_multiplier: Decimal::from_parts(20, 0, 0, false, 1),
        }
    }
}

/// One row of the progressive tax schedule.
///
/// `base_tax` is the cumulative tax owed at `threshold`; income above
/// the threshold is taxed at `marginal_rate` until the next bracket.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (exclusive).
    pub threshold: Decimal,
    /// Tax owed on income exactly at the threshold.
    pub base_tax: Decimal,
    /// Rate applied to income above the threshold.
    pub marginal_rate: Decimal,
}

/// Annualisation factor and progressive bracket table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaxRules {
    /// Weeks used to annualise weekly pay and spread tax back.
    pub weeks_per_year: u32,
    /// Bracket table, kept sorted by ascending threshold.
    pub brackets: Vec<TaxBracket>,
}

impl Default for TaxRules {
    fn default() -> Self {
        // Australian resident rates for 2024-25.
        Self {
            weeks_per_year: 52,
            brackets: vec![
                TaxBracket {
                    threshold: Decimal::ZERO,
                    base_tax: Decimal::ZERO,
                    marginal_rate: Decimal::ZERO,
                },
                TaxBracket {
                    threshold: Decimal::from_parts(18200, 0, 0, false, 0),
                    base_tax: Decimal::ZERO,
                    marginal_rate: Decimal::from_parts(16, 0, 0, false, 2),
                },
                TaxBracket {
                    threshold: Decimal::from_parts(45000, 0, 0, false, 0),
                    base_tax: Decimal::from_parts(4288, 0, 0, false, 0),
                    marginal_rate: Decimal::from_parts(30, 0, 0, false, 2),
                },
                TaxBracket {
                    threshold: Decimal::from_parts(135000, 0, 0, false, 0),
                    base_tax: Decimal::from_parts(31288, 0, 0, false, 0),
                    marginal_rate: Decimal::from_parts(37, 0, 0, false, 2),
                },
                TaxBracket {
                    threshold: Decimal::from_parts(190000, 0, 0, false, 0),
                    base_tax: Decimal::from_parts(51738, 0, 0, false, 0),
                    marginal_rate: Decimal::from_parts(45, 0, 0, false, 2),
                },
            ],
        }
    }
}

/// Employer superannuation contribution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuperannuationRules {
    /// Superannuation guarantee rate applied to gross weekly pay.
    pub sg_rate: Decimal,
}

impl Default for SuperannuationRules {
    fn default() -> Self {
        Self {
            sg_rate: Decimal::from_parts(12, 0, 0, false, 2),
        }
    }
}

/// Clock event timing windows around the rostered shift.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeclockRules {
    /// Minutes before the rostered start a clock-in is accepted.
    pub early_clock_in_minutes: i64,
    /// Minutes after the rostered start a clock-in is accepted.
    pub late_clock_in_minutes: i64,
    /// Minutes before the rostered end a clock-out is accepted.
    pub early_clock_out_minutes: i64,
    /// Minutes after the rostered end a clock-out is accepted.
    pub late_clock_out_minutes: i64,
}

impl Default for TimeclockRules {
    fn default() -> Self {
        Self {
            early_clock_in_minutes: 15,
            late_clock_in_minutes: 30,
            early_clock_out_minutes: 0,
            late_clock_out_minutes: 15,
        }
    }
}

/// Rounding and break deduction applied during reconciliation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconciliationRules {
    /// Pair durations are rounded to the nearest multiple of this many minutes.
    pub rounding_increment_minutes: u32,
    /// Pairs longer than this many hours have an unpaid break deducted.
    pub break_deduction_threshold_hours: Decimal,
    /// Hours deducted for the unpaid break.
    pub break_deduction_hours: Decimal,
}

impl Default for ReconciliationRules {
    fn default() -> Self {
        Self {
            rounding_increment_minutes: 5,
            break_deduction_threshold_hours: Decimal::from_parts(5, 0, 0, false, 0),
            break_deduction_hours: Decimal::from_parts(5, 0, 0, false, 1),
        }
    }
}

/// Default hourly rate for a role and contract type combination.
///
/// Used to seed the standard pay rate of new staff; the casual rates
/// already include the casual loading.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultPayRate {
    /// The role the rate applies to.
    pub role: Role,
    /// The contract type the rate applies to.
    pub contract_type: ContractType,
    /// Standard hourly rate in dollars.
    pub standard_rate: Decimal,
}

/// The complete rule set the engine runs under.
///
/// Every section defaults to the statutory values, so
/// `EngineRules::default()` is a fully working configuration and a YAML
/// file only needs the sections it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineRules {
    /// Overtime thresholds and multipliers.
    pub overtime: OvertimeRules,
    /// Tax annualisation and bracket table.
    pub tax: TaxRules,
    /// Employer superannuation settings.
    pub superannuation: SuperannuationRules,
    /// Clock-in and clock-out timing windows.
    pub timeclock: TimeclockRules,
    /// Reconciliation rounding and break deduction.
    pub reconciliation: ReconciliationRules,
    /// Default pay rates by role and contract type.
    pub default_pay_rates: Vec<DefaultPayRate>,
}

impl Default for EngineRules {
    fn default() -> Self {
        Self {
            overtime: OvertimeRules::default(),
            tax: TaxRules::default(),
            superannuation: SuperannuationRules::default(),
            timeclock: TimeclockRules::default(),
            reconciliation: ReconciliationRules::default(),
            default_pay_rates: default_pay_rate_table(),
        }
    }
}

impl EngineRules {
    /// Looks up the default standard rate for a role and contract type.
    pub fn default_rate(&self, role: Role, contract_type: ContractType) -> Option<Decimal> {
        self.default_pay_rates
            .iter()
            .find(|entry| entry.role == role && entry.contract_type == contract_type)
            .map(|entry| entry.standard_rate)
    }
}

/// The award-derived default rate table.
///
/// Part-time staff share the full-time hourly rate; casual rates carry
/// the 25% loading.
fn default_pay_rate_table() -> Vec<DefaultPayRate> {
    fn rate(role: Role, contract_type: ContractType, cents: u32) -> DefaultPayRate {
        DefaultPayRate {
            role,
            contract_type,
            standard_rate: Decimal::from_parts(cents, 0, 0, false, 2),
        }
    }

    vec![
        rate(Role::Worker, ContractType::FullTime, 2500),
        rate(Role::Worker, ContractType::PartTime, 2500),
        rate(Role::Worker, ContractType::Casual, 3125),
        rate(Role::Admin, ContractType::FullTime, 3500),
        rate(Role::Admin, ContractType::PartTime, 3500),
        rate(Role::Admin, ContractType::Casual, 4375),
    ]
}
