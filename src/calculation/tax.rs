//! PAYG withholding and superannuation assessment.
//!
//! Annualises a gross weekly pay, walks the progressive bracket table to
//! find the annual tax, and derives the weekly withholding, net pay, and
//! employer superannuation contribution. All arithmetic stays in
//! [`Decimal`]; nothing is rounded for display here, the full precision
//! is carried onto the payslip.

use rust_decimal::Decimal;

use crate::config::{SuperannuationRules, TaxRules};

/// The tax and superannuation figures derived from one gross weekly pay.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxAssessment {
    /// The gross weekly pay the assessment is based on.
    pub gross_weekly_pay: Decimal,
    /// Gross annualised over the configured weeks per year.
    pub annual_income: Decimal,
    /// Annual tax from the progressive bracket table.
    pub annual_tax: Decimal,
    /// Annual tax spread back over the year, withheld weekly.
    pub weekly_payg: Decimal,
    /// Gross weekly pay less the weekly withholding.
    pub net_pay: Decimal,
    /// Employer superannuation on top of gross, never deducted from it.
    pub employer_superannuation: Decimal,
}

/// Annual tax on `annual_income` under the bracket table in `rules`.
///
/// Each bracket carries its lower threshold, the cumulative tax owed at
/// that threshold, and the marginal rate above it. The brackets must be
/// sorted by ascending threshold; the applicable bracket is the last one
/// whose threshold the income exceeds. Income at or below the first
/// threshold owes nothing.
pub fn annual_tax(annual_income: Decimal, rules: &TaxRules) -> Decimal {
    let bracket = rules
        .brackets
        .iter()
        .take_while(|bracket| annual_income > bracket.threshold)
        .last();

    match bracket {
        Some(bracket) => {
            bracket.base_tax + bracket.marginal_rate * (annual_income - bracket.threshold)
        }
        None => Decimal::ZERO,
    }
}

/// Assesses PAYG withholding and superannuation for a gross weekly pay.
///
/// # Arguments
///
/// * `gross_weekly_pay` - Gross earnings for the week
/// * `tax` - Annualisation factor and bracket table
/// * `superannuation` - Employer contribution rate
///
/// # Returns
///
/// The full [`TaxAssessment`], with `net_pay = gross - weekly_payg`.
///
/// # Examples
///
/// ```
/// use farmtime_engine::calculation::assess;
/// use farmtime_engine::config::{SuperannuationRules, TaxRules};
/// use rust_decimal::Decimal;
///
/// let assessment = assess(
///     Decimal::from(800),
///     &TaxRules::default(),
///     &SuperannuationRules::default(),
/// );
///
/// assert_eq!(assessment.annual_income, Decimal::from(41600));
/// assert_eq!(assessment.weekly_payg, Decimal::from(72));
/// assert_eq!(assessment.net_pay, Decimal::from(728));
/// ```
pub fn assess(
    gross_weekly_pay: Decimal,
    tax: &TaxRules,
    superannuation: &SuperannuationRules,
) -> TaxAssessment {
    let weeks = Decimal::from(tax.weeks_per_year);
    let annual_income = gross_weekly_pay * weeks;
    let annual_tax = annual_tax(annual_income, tax);
    let weekly_payg = annual_tax / weeks;

    TaxAssessment {
        gross_weekly_pay,
        annual_income,
        annual_tax,
        weekly_payg,
        net_pay: gross_weekly_pay - weekly_payg,
        employer_superannuation: gross_weekly_pay * superannuation.sg_rate,
    }
}
