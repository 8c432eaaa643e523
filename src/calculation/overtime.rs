//! Weekly overtime classification.
//!
//! Splits a week of reconciled day hours into pay categories and prices
//! each category from the staff member's base rate:
//!
//! * Saturday and Sunday hours are weekend hours, paid at the weekend
//!   multiplier regardless of weekly totals.
//! * Weekday hours beyond the daily threshold are daily overtime.
//! * Weekday hours beyond both the standard week and the daily
//!   overtime total are weekly overtime, the first tier-1 span at the
//!   lower multiplier and the remainder at tier 2. Ordinary hours
//!   absorb what is left, so no hour is ever paid twice.

use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;

use crate::config::OvertimeRules;
use crate::models::{DayHours, PayCategory, PayComponents, PayLine};

/// A week of hours classified into pay categories and priced.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyClassification {
    /// Hours per pay category.
    pub components: PayComponents,
    /// One priced line per non-empty category.
    pub pay_lines: Vec<PayLine>,
    /// Sum of all line amounts.
    pub gross_pay: Decimal,
}

/// Classifies a week of day hours and prices it at `base_rate`.
///
/// Weekly overtime is measured beyond the larger of the standard week
/// and the daily overtime total, and ordinary hours are capped at the
/// standard week less daily overtime, so the five categories partition
/// the worked hours: every hour is paid under exactly one category.
///
/// # Arguments
///
/// * `days` - Reconciled hours per day, any order
/// * `base_rate` - The staff member's standard hourly rate
/// * `rules` - Thresholds and multipliers
///
/// # Returns
///
/// The classified components, priced pay lines, and gross weekly pay.
///
/// # Examples
///
/// ```
/// use farmtime_engine::calculation::classify_week;
/// use farmtime_engine::config::OvertimeRules;
/// use farmtime_engine::models::DayHours;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Five 8-hour weekdays: 38 ordinary plus 2 hours of weekly overtime.
/// let days: Vec<DayHours> = (6..11)
///     .map(|d| DayHours {
///         date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
///         hours_worked: Decimal::from(8),
///     })
///     .collect();
///
/// let week = classify_week(&days, Decimal::from(25), &OvertimeRules::default());
/// assert_eq!(week.gross_pay, Decimal::from(1025));
/// ```
pub fn classify_week(
    days: &[DayHours],
    base_rate: Decimal,
    rules: &OvertimeRules,
) -> WeeklyClassification {
    let mut weekend_hours = Decimal::ZERO;
    let mut weekday_hours = Decimal::ZERO;
    let mut daily_overtime_hours = Decimal::ZERO;

    for day in days {
        if is_weekend(day) {
            weekend_hours += day.hours_worked;
        } else {
            weekday_hours += day.hours_worked;
            if day.hours_worked > rules.daily_overtime_threshold_hours {
                daily_overtime_hours += day.hours_worked - rules.daily_overtime_threshold_hours;
            }
        }
    }

    // The weekly tiers price only hours not already daily overtime, so
    // the excess is measured beyond whichever is larger: the standard
    // week or the daily overtime total.
    let weekly_excess = (weekday_hours
        - rules.standard_weekly_hours.max(daily_overtime_hours))
    .max(Decimal::ZERO);
    let tier1_hours = weekly_excess.min(rules.weekly_overtime_tier1_span_hours);
    let tier2_hours = weekly_excess - tier1_hours;

    // Every weekday hour lands in exactly one bucket, so ordinary hours
    // are what remains of the capped week after daily overtime.
    let ordinary_hours = (weekday_hours.min(rules.standard_weekly_hours) - daily_overtime_hours)
        .max(Decimal::ZERO);

    let components = PayComponents {
        ordinary_hours,
        daily_overtime_hours,
        weekly_overtime_tier1_hours: tier1_hours,
        weekly_overtime_tier2_hours: tier2_hours,
        weekend_hours,
    };

    let pay_lines = build_pay_lines(&components, base_rate, rules);
    let gross_pay = pay_lines.iter().map(|line| line.amount).sum();

    WeeklyClassification {
        components,
        pay_lines,
        gross_pay,
    }
}

/// Builds one priced line per non-empty category, in payslip order.
fn build_pay_lines(
    components: &PayComponents,
    base_rate: Decimal,
    rules: &OvertimeRules,
) -> Vec<PayLine> {
    let categories = [
        (PayCategory::Ordinary, components.ordinary_hours, Decimal::ONE),
        (
            PayCategory::DailyOvertime,
            components.daily_overtime_hours,
            rules.daily_overtime_multiplier,
        ),
        (
            PayCategory::WeeklyOvertimeTier1,
            components.weekly_overtime_tier1_hours,
            rules.weekly_overtime_tier1_multiplier,
        ),
        (
            PayCategory::WeeklyOvertimeTier2,
            components.weekly_overtime_tier2_hours,
            rules.weekly_overtime_tier2_multiplier,
        ),
        (
            PayCategory::Weekend,
            components.weekend_hours,
            rules.weekend_multiplier,
        ),
    ];

    categories
        .into_iter()
        .filter(|(_, hours, _)| !hours.is_zero())
        .map(|(category, hours, multiplier)| {
            let rate = base_rate * multiplier;
            PayLine {
                category,
                hours,
                multiplier,
                rate,
                amount: hours * rate,
            }
        })
        .collect()
}

fn is_weekend(day: &DayHours) -> bool {
    matches!(day.date.weekday(), Weekday::Sat | Weekday::Sun)
}
