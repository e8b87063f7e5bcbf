//! Weekly pay and day rate.
//!
//! Rates are derived from base salary only. Superannuation is excluded.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Weeks in a salary year.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Working days in a week. Not configurable.
pub const WORKING_DAYS_PER_WEEK: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Returns annual salary / 52.
pub fn weekly_pay(annual_salary: Decimal) -> Decimal {
    annual_salary / WEEKS_PER_YEAR
}

/// Returns weekly pay / 5.
pub fn day_rate(weekly_pay: Decimal) -> Decimal {
    weekly_pay / WORKING_DAYS_PER_WEEK
}

/// The derived pay rates, including the audit step.
#[derive(Debug, Clone)]
pub struct PayRatesResult {
    /// Annual salary / 52.
    pub weekly_pay: Decimal,
    /// Weekly pay / 5.
    pub day_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Derives the weekly pay and day rate from the annual salary.
///
/// # Examples
///
/// ```
/// use redundancy_engine::calculation::calculate_pay_rates;
/// use rust_decimal::Decimal;
///
/// let result = calculate_pay_rates(Decimal::from(52_000), 2);
/// assert_eq!(result.weekly_pay, Decimal::from(1_000));
/// assert_eq!(result.day_rate, Decimal::from(200));
/// ```
pub fn calculate_pay_rates(annual_salary: Decimal, step_number: u32) -> PayRatesResult {
    let weekly = weekly_pay(annual_salary);
    let daily = day_rate(weekly);

    let audit_step = AuditStep {
        step_number,
        rule_id: "pay_rates".to_string(),
        rule_name: "Weekly Pay and Day Rate".to_string(),
        clause_ref: "3.27.4".to_string(),
        input: serde_json::json!({
            "annual_salary": annual_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "weekly_pay": weekly.normalize().to_string(),
            "day_rate": daily.normalize().to_string()
        }),
        reasoning: format!(
            "${} / 52 = ${} per week; / 5 = ${} per day",
            annual_salary.normalize(),
            weekly.round_dp(2),
            daily.round_dp(2)
        ),
    };

    PayRatesResult {
        weekly_pay: weekly,
        day_rate: daily,
        audit_step,
    }
}
