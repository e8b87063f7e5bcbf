//! Gross cash components of the payout.
//!
//! Redundancy, notice and long service leave are paid in weeks at the
//! weekly rate; annual leave is paid in days at the day rate, with optional
//! loading on top.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CashComponents, RedundancyInputs};

/// Clause for the notice period on redundancy.
pub const NOTICE_CLAUSE: &str = "1.47";

/// Clause for the annual leave payout (and its loading).
pub const ANNUAL_LEAVE_CLAUSE: &str = "1.19.6";

/// Clause for the pro-rata long service leave payout on redundancy.
pub const LONG_SERVICE_LEAVE_CLAUSE: &str = "1.20.5";

/// Returns the annual leave loading amount, or 0 when loading is off.
pub fn leave_loading(
    annual_leave_gross: Decimal,
    include_loading: bool,
    loading_pct: Decimal,
) -> Decimal {
    if include_loading {
        loading_pct * annual_leave_gross
    } else {
        Decimal::ZERO
    }
}

/// The gross cash components, including one audit step per component.
#[derive(Debug, Clone)]
pub struct CashComponentsResult {
    /// The gross amounts.
    pub components: CashComponents,
    /// Audit steps, one per component, in calculation order.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates every gross cash component.
///
/// # Arguments
///
/// * `inputs` - The calculation inputs (quantities and loading settings)
/// * `weekly_pay` - Annual salary / 52
/// * `day_rate` - Weekly pay / 5
/// * `redundancy_weeks` - The clamped redundancy entitlement
/// * `step_number` - The step number of the first audit step
pub fn calculate_cash_components(
    inputs: &RedundancyInputs,
    weekly_pay: Decimal,
    day_rate: Decimal,
    redundancy_weeks: Decimal,
    step_number: u32,
) -> CashComponentsResult {
    let redundancy_gross = redundancy_weeks * weekly_pay;
    let notice_gross = inputs.notice_weeks * weekly_pay;
    let annual_leave_gross = inputs.unused_annual_leave_days * day_rate;
    let long_service_leave_gross = inputs.unused_long_service_leave_weeks * weekly_pay;
    let leave_loading_gross = leave_loading(
        annual_leave_gross,
        inputs.include_annual_leave_loading,
        inputs.annual_leave_loading_pct,
    );
    let leave_gross = annual_leave_gross + long_service_leave_gross + leave_loading_gross;

    let audit_steps = vec![
        AuditStep {
            step_number,
            rule_id: "redundancy_pay".to_string(),
            rule_name: "Redundancy Pay".to_string(),
            clause_ref: super::REDUNDANCY_PAY_CLAUSE.to_string(),
            input: serde_json::json!({
                "weeks": redundancy_weeks.normalize().to_string(),
                "weekly_pay": weekly_pay.normalize().to_string()
            }),
            output: serde_json::json!({
                "gross": redundancy_gross.normalize().to_string()
            }),
            reasoning: format!(
                "{} weeks x ${} = ${}",
                redundancy_weeks.normalize(),
                weekly_pay.round_dp(2),
                redundancy_gross.round_dp(2)
            ),
        },
        AuditStep {
            step_number: step_number + 1,
            rule_id: "notice_pay".to_string(),
            rule_name: "Notice Pay".to_string(),
            clause_ref: NOTICE_CLAUSE.to_string(),
            input: serde_json::json!({
                "notice_weeks": inputs.notice_weeks.normalize().to_string(),
                "weekly_pay": weekly_pay.normalize().to_string(),
                "paid_in_lieu": inputs.notice_paid_in_lieu
            }),
            output: serde_json::json!({
                "gross": notice_gross.normalize().to_string()
            }),
            reasoning: format!(
                "{} weeks x ${} = ${}",
                inputs.notice_weeks.normalize(),
                weekly_pay.round_dp(2),
                notice_gross.round_dp(2)
            ),
        },
        AuditStep {
            step_number: step_number + 2,
            rule_id: "annual_leave_payout".to_string(),
            rule_name: "Annual Leave Payout".to_string(),
            clause_ref: ANNUAL_LEAVE_CLAUSE.to_string(),
            input: serde_json::json!({
                "unused_days": inputs.unused_annual_leave_days.normalize().to_string(),
                "day_rate": day_rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "gross": annual_leave_gross.normalize().to_string()
            }),
            reasoning: format!(
                "{} days x ${} = ${}",
                inputs.unused_annual_leave_days.normalize(),
                day_rate.round_dp(2),
                annual_leave_gross.round_dp(2)
            ),
        },
        AuditStep {
            step_number: step_number + 3,
            rule_id: "long_service_leave_payout".to_string(),
            rule_name: "Long Service Leave Payout".to_string(),
            clause_ref: LONG_SERVICE_LEAVE_CLAUSE.to_string(),
            input: serde_json::json!({
                "unused_weeks": inputs.unused_long_service_leave_weeks.normalize().to_string(),
                "weekly_pay": weekly_pay.normalize().to_string()
            }),
            output: serde_json::json!({
                "gross": long_service_leave_gross.normalize().to_string()
            }),
            reasoning: format!(
                "{} weeks x ${} = ${}",
                inputs.unused_long_service_leave_weeks.normalize(),
                weekly_pay.round_dp(2),
                long_service_leave_gross.round_dp(2)
            ),
        },
        AuditStep {
            step_number: step_number + 4,
            rule_id: "annual_leave_loading".to_string(),
            rule_name: "Annual Leave Loading".to_string(),
            clause_ref: ANNUAL_LEAVE_CLAUSE.to_string(),
            input: serde_json::json!({
                "include_loading": inputs.include_annual_leave_loading,
                "loading_pct": inputs.annual_leave_loading_pct.normalize().to_string(),
                "annual_leave_gross": annual_leave_gross.normalize().to_string()
            }),
            output: serde_json::json!({
                "gross": leave_loading_gross.normalize().to_string(),
                "leave_gross": leave_gross.normalize().to_string()
            }),
            reasoning: if inputs.include_annual_leave_loading {
                format!(
                    "{} x ${} = ${}",
                    inputs.annual_leave_loading_pct.normalize(),
                    annual_leave_gross.round_dp(2),
                    leave_loading_gross.round_dp(2)
                )
            } else {
                "Annual leave loading not included".to_string()
            },
        },
    ];

    CashComponentsResult {
        components: CashComponents {
            redundancy_gross,
            notice_gross,
            annual_leave_gross,
            long_service_leave_gross,
            leave_loading_gross,
            leave_gross,
        },
        audit_steps,
    }
}
