//! End-to-end payout calculation.
//!
//! Data flows strictly forward: dates -> service facts -> gross components
//! -> tax figures -> totals. [`compute`] is a pure function of its input and
//! always returns the same result for the same input.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CashComponents, EtpAssessment, RedundancyInputs,
    RedundancyResult, TaxEstimate, WarningSeverity,
};

use super::cash_components::calculate_cash_components;
use super::etp::calculate_etp_tax;
use super::pay_rates::calculate_pay_rates;
use super::redundancy_weeks::calculate_redundancy_weeks;
use super::service::evaluate_service;
use super::tax_free_cap::{TAX_ESTIMATE_REF, calculate_tax_free_cap};
use super::withholding::calculate_withholding;

/// Warning code: the notice date precedes the start date.
pub const WARNING_NOTICE_BEFORE_START: &str = "NOTICE_BEFORE_START";

/// Warning code: the start date precedes the date of birth.
pub const WARNING_START_BEFORE_BIRTH: &str = "START_BEFORE_BIRTH";

/// Warning code: a loading or tax rate lies outside [0, 1].
pub const WARNING_RATE_OUT_OF_RANGE: &str = "RATE_OUT_OF_RANGE";

/// Aggregates gross, tax and net.
///
/// Total gross always includes notice pay, whatever the notice treatment.
pub fn aggregate_totals(
    cash: &CashComponents,
    etp_tax: Decimal,
    leave_tax: Decimal,
    notice_tax: Decimal,
) -> TaxEstimate {
    let total_gross = cash.redundancy_gross + cash.notice_gross + cash.leave_gross;
    let total_tax = etp_tax + leave_tax + notice_tax;

    TaxEstimate {
        etp_tax,
        leave_tax,
        notice_tax,
        total_gross,
        total_tax,
        total_net: total_gross - total_tax,
    }
}

/// Flags inputs the engine absorbed instead of rejecting.
pub fn collect_input_warnings(inputs: &RedundancyInputs) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if inputs.notice_date < inputs.start_date {
        warnings.push(AuditWarning {
            code: WARNING_NOTICE_BEFORE_START.to_string(),
            message: format!(
                "Notice date {} is before start date {}; service counted as 0 months",
                inputs.notice_date, inputs.start_date
            ),
            severity: WarningSeverity::Medium,
        });
    }

    if inputs.start_date < inputs.date_of_birth {
        warnings.push(AuditWarning {
            code: WARNING_START_BEFORE_BIRTH.to_string(),
            message: format!(
                "Start date {} is before date of birth {}",
                inputs.start_date, inputs.date_of_birth
            ),
            severity: WarningSeverity::Medium,
        });
    }

    for (field, value) in inputs.rates() {
        if value < Decimal::ZERO || value > Decimal::ONE {
            warnings.push(AuditWarning {
                code: WARNING_RATE_OUT_OF_RANGE.to_string(),
                message: format!("{} is {}, expected a fraction between 0 and 1", field, value),
                severity: WarningSeverity::Low,
            });
        }
    }

    warnings
}

/// Computes the full payout estimate for one set of inputs.
///
/// # Examples
///
/// ```
/// use redundancy_engine::calculation::compute;
/// use redundancy_engine::models::{RedundancyInputs, TaxSettings};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let inputs = RedundancyInputs {
///     annual_salary: Decimal::from(158_000),
///     date_of_birth: NaiveDate::from_ymd_opt(1992, 8, 12).unwrap(),
///     start_date: NaiveDate::from_ymd_opt(2021, 10, 11).unwrap(),
///     notice_date: NaiveDate::from_ymd_opt(2029, 10, 11).unwrap(),
///     notice_weeks: Decimal::from(8),
///     notice_paid_in_lieu: true,
///     unused_annual_leave_days: Decimal::from(5),
///     unused_long_service_leave_weeks: Decimal::from(4),
///     include_annual_leave_loading: false,
///     annual_leave_loading_pct: Decimal::new(175, 3),
///     tax: TaxSettings {
///         cap_base_amount: Decimal::from(13_100),
///         cap_per_service_year_amount: Decimal::from(6_552),
///         is_under_preservation_age: true,
///         etp_tax_rate_under: Decimal::new(32, 2),
///         etp_tax_rate_over: Decimal::new(17, 2),
///         leave_withholding_rate: Decimal::new(32, 2),
///     },
/// };
///
/// let result = compute(&inputs);
/// assert_eq!(result.redundancy.weeks, Decimal::from(24));
/// assert_eq!(result.etp.tax_free_cap, Decimal::from(65_516));
/// assert_eq!(result.tax.total_net, result.tax.total_gross - result.tax.total_tax);
/// ```
pub fn compute(inputs: &RedundancyInputs) -> RedundancyResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let evaluation = evaluate_service(
        inputs.date_of_birth,
        inputs.start_date,
        inputs.notice_date,
        step_number,
    );
    steps.push(evaluation.audit_step);
    step_number += 1;

    let rates = calculate_pay_rates(inputs.annual_salary, step_number);
    steps.push(rates.audit_step);
    step_number += 1;

    let weeks =
        calculate_redundancy_weeks(&evaluation.service, evaluation.age_on_notice, step_number);
    steps.push(weeks.audit_step);
    step_number += 1;

    let cash_result = calculate_cash_components(
        inputs,
        rates.weekly_pay,
        rates.day_rate,
        weeks.entitlement.weeks,
        step_number,
    );
    step_number += cash_result.audit_steps.len() as u32;
    steps.extend(cash_result.audit_steps);
    let cash = cash_result.components;

    let cap = calculate_tax_free_cap(&inputs.tax, evaluation.service.years, step_number);
    steps.push(cap.audit_step);
    step_number += 1;

    let notice_treatment = inputs.notice_treatment();

    let etp = calculate_etp_tax(&cash, cap.cap, &inputs.tax, notice_treatment, step_number);
    steps.push(etp.audit_step);
    step_number += 1;

    let withholding = calculate_withholding(
        &cash,
        inputs.tax.leave_withholding_rate,
        notice_treatment,
        step_number,
    );
    steps.push(withholding.audit_step);
    step_number += 1;

    let tax = aggregate_totals(
        &cash,
        etp.assessment.etp_tax,
        withholding.leave_tax,
        withholding.notice_tax,
    );
    steps.push(totals_audit_step(&etp.assessment, &tax, step_number));

    debug!(
        completed_months = evaluation.service.completed_months,
        age_on_notice = evaluation.age_on_notice,
        redundancy_weeks = %weeks.entitlement.weeks,
        total_gross = %tax.total_gross.round_dp(2),
        total_net = %tax.total_net.round_dp(2),
        "Payout computed"
    );

    RedundancyResult {
        weekly_pay: rates.weekly_pay,
        day_rate: rates.day_rate,
        service: evaluation.service,
        age_on_notice: evaluation.age_on_notice,
        redundancy: weeks.entitlement,
        cash,
        etp: etp.assessment,
        tax,
        audit_trace: AuditTrace {
            steps,
            warnings: collect_input_warnings(inputs),
        },
    }
}

fn totals_audit_step(etp: &EtpAssessment, tax: &TaxEstimate, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "payout_totals".to_string(),
        rule_name: "Payout Totals".to_string(),
        clause_ref: TAX_ESTIMATE_REF.to_string(),
        input: serde_json::json!({
            "etp_gross": etp.etp_gross.normalize().to_string(),
            "etp_tax": tax.etp_tax.normalize().to_string(),
            "leave_tax": tax.leave_tax.normalize().to_string(),
            "notice_tax": tax.notice_tax.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_gross": tax.total_gross.normalize().to_string(),
            "total_tax": tax.total_tax.normalize().to_string(),
            "total_net": tax.total_net.normalize().to_string()
        }),
        reasoning: format!(
            "${} gross - ${} tax = ${} net",
            tax.total_gross.round_dp(2),
            tax.total_tax.round_dp(2),
            tax.total_net.round_dp(2)
        ),
    }
}
