//! Employment termination payment (ETP) pool and tax.
//!
//! The pool is redundancy pay plus notice paid in lieu. The part above the
//! tax-free cap is taxed at a single flat rate chosen by preservation age.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CashComponents, EtpAssessment, NoticeTreatment, TaxSettings};

use super::tax_free_cap::TAX_ESTIMATE_REF;

/// Returns the ETP pool: redundancy pay, plus notice when paid in lieu.
pub fn etp_pool(
    redundancy_gross: Decimal,
    notice_gross: Decimal,
    notice_treatment: NoticeTreatment,
) -> Decimal {
    match notice_treatment {
        NoticeTreatment::PaidInLieu => redundancy_gross + notice_gross,
        NoticeTreatment::WorkedOut => redundancy_gross,
    }
}

/// Returns `max(0, etp_gross - cap)`.
pub fn taxable_etp(etp_gross: Decimal, cap: Decimal) -> Decimal {
    (etp_gross - cap).max(Decimal::ZERO)
}

/// The ETP assessment, including the audit step.
#[derive(Debug, Clone)]
pub struct EtpTaxResult {
    /// Pool, cap, taxable slice and tax.
    pub assessment: EtpAssessment,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Assesses the ETP pool against the tax-free cap and applies the flat rate.
///
/// # Examples
///
/// ```
/// use redundancy_engine::calculation::calculate_etp_tax;
/// use redundancy_engine::models::{CashComponents, NoticeTreatment, TaxSettings};
/// use rust_decimal::Decimal;
///
/// let cash = CashComponents {
///     redundancy_gross: Decimal::from(60_000),
///     notice_gross: Decimal::from(16_000),
///     annual_leave_gross: Decimal::ZERO,
///     long_service_leave_gross: Decimal::ZERO,
///     leave_loading_gross: Decimal::ZERO,
///     leave_gross: Decimal::ZERO,
/// };
/// let settings = TaxSettings {
///     cap_base_amount: Decimal::from(13_100),
///     cap_per_service_year_amount: Decimal::from(6_552),
///     is_under_preservation_age: true,
///     etp_tax_rate_under: Decimal::new(32, 2),
///     etp_tax_rate_over: Decimal::new(17, 2),
///     leave_withholding_rate: Decimal::new(32, 2),
/// };
///
/// let result = calculate_etp_tax(&cash, Decimal::from(66_000), &settings, NoticeTreatment::PaidInLieu, 10);
/// assert_eq!(result.assessment.taxable_etp, Decimal::from(10_000));
/// assert_eq!(result.assessment.etp_tax, Decimal::from(3_200));
/// ```
pub fn calculate_etp_tax(
    cash: &CashComponents,
    cap: Decimal,
    settings: &TaxSettings,
    notice_treatment: NoticeTreatment,
    step_number: u32,
) -> EtpTaxResult {
    let etp_gross = etp_pool(cash.redundancy_gross, cash.notice_gross, notice_treatment);
    let taxable = taxable_etp(etp_gross, cap);
    let applied_rate = settings.applicable_etp_rate();
    let etp_tax = taxable * applied_rate;

    let reasoning = if taxable.is_zero() {
        format!(
            "ETP pool ${} is within the ${} tax-free cap; no ETP tax",
            etp_gross.round_dp(2),
            cap.round_dp(2)
        )
    } else {
        format!(
            "(${} - ${}) x {} = ${}",
            etp_gross.round_dp(2),
            cap.round_dp(2),
            applied_rate.normalize(),
            etp_tax.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "etp_tax".to_string(),
        rule_name: "ETP Tax".to_string(),
        clause_ref: TAX_ESTIMATE_REF.to_string(),
        input: serde_json::json!({
            "redundancy_gross": cash.redundancy_gross.normalize().to_string(),
            "notice_gross": cash.notice_gross.normalize().to_string(),
            "notice_treatment": notice_treatment,
            "tax_free_cap": cap.normalize().to_string(),
            "under_preservation_age": settings.is_under_preservation_age
        }),
        output: serde_json::json!({
            "etp_gross": etp_gross.normalize().to_string(),
            "taxable_etp": taxable.normalize().to_string(),
            "applied_rate": applied_rate.normalize().to_string(),
            "etp_tax": etp_tax.normalize().to_string()
        }),
        reasoning,
    };

    EtpTaxResult {
        assessment: EtpAssessment {
            etp_gross,
            tax_free_cap: cap,
            taxable_etp: taxable,
            applied_rate,
            etp_tax,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_cash() -> CashComponents {
        CashComponents {
            redundancy_gross: dec("60000"),
            notice_gross: dec("16000"),
            annual_leave_gross: dec("4000"),
            long_service_leave_gross: dec("8000"),
            leave_loading_gross: Decimal::ZERO,
            leave_gross: dec("12000"),
        }
    }

    fn create_test_settings(under_preservation_age: bool) -> TaxSettings {
        TaxSettings {
            cap_base_amount: dec("13100"),
            cap_per_service_year_amount: dec("6552"),
            is_under_preservation_age: under_preservation_age,
            etp_tax_rate_under: dec("0.32"),
            etp_tax_rate_over: dec("0.17"),
            leave_withholding_rate: dec("0.32"),
        }
    }

    #[test]
    fn test_pool_includes_notice_in_lieu() {
        assert_eq!(
            etp_pool(dec("60000"), dec("16000"), NoticeTreatment::PaidInLieu),
            dec("76000")
        );
    }

    #[test]
    fn test_pool_excludes_worked_notice() {
        assert_eq!(
            etp_pool(dec("60000"), dec("16000"), NoticeTreatment::WorkedOut),
            dec("60000")
        );
    }

    #[test]
    fn test_taxable_etp_is_floored_at_zero() {
        assert_eq!(taxable_etp(dec("50000"), dec("65516")), Decimal::ZERO);
        assert_eq!(taxable_etp(dec("65516"), dec("65516")), Decimal::ZERO);
        assert_eq!(taxable_etp(dec("70000"), dec("65516")), dec("4484"));
    }

    #[test]
    fn test_pool_within_cap_has_no_tax() {
        let result = calculate_etp_tax(
            &create_test_cash(),
            dec("100000"),
            &create_test_settings(true),
            NoticeTreatment::PaidInLieu,
            10,
        );

        assert_eq!(result.assessment.taxable_etp, Decimal::ZERO);
        assert_eq!(result.assessment.etp_tax, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("no ETP tax"));
    }

    #[test]
    fn test_over_preservation_age_uses_lower_rate() {
        let result = calculate_etp_tax(
            &create_test_cash(),
            dec("66000"),
            &create_test_settings(false),
            NoticeTreatment::PaidInLieu,
            10,
        );

        assert_eq!(result.assessment.applied_rate, dec("0.17"));
        assert_eq!(result.assessment.etp_tax, dec("1700"));
    }

    #[test]
    fn test_worked_notice_keeps_pool_under_cap() {
        let result = calculate_etp_tax(
            &create_test_cash(),
            dec("66000"),
            &create_test_settings(true),
            NoticeTreatment::WorkedOut,
            10,
        );

        assert_eq!(result.assessment.etp_gross, dec("60000"));
        assert_eq!(result.assessment.etp_tax, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_records_treatment() {
        let result = calculate_etp_tax(
            &create_test_cash(),
            dec("66000"),
            &create_test_settings(true),
            NoticeTreatment::WorkedOut,
            10,
        );

        assert_eq!(result.audit_step.rule_id, "etp_tax");
        assert_eq!(result.audit_step.input["notice_treatment"], "worked_out");
        assert_eq!(result.audit_step.output["etp_gross"], "60000");
    }
}
