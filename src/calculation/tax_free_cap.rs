//! Tax-free cap for genuine redundancy payments.
//!
//! The cap is a flat base plus a fixed amount per completed year of service.
//! Remaining months do not count towards the cap.

use rust_decimal::Decimal;

use crate::models::{AuditStep, TaxSettings};

/// Clause reference used for every tax-estimate step.
pub const TAX_ESTIMATE_REF: &str = "tax_estimate";

/// Returns `base + per_service_year * completed_years`.
///
/// # Examples
///
/// ```
/// use redundancy_engine::calculation::tax_free_cap;
/// use rust_decimal::Decimal;
///
/// let cap = tax_free_cap(Decimal::from(13_100), Decimal::from(6_552), 8);
/// assert_eq!(cap, Decimal::from(65_516));
/// ```
pub fn tax_free_cap(base: Decimal, per_service_year: Decimal, completed_years: u32) -> Decimal {
    base + per_service_year * Decimal::from(completed_years)
}

/// The tax-free cap, including the audit step.
#[derive(Debug, Clone)]
pub struct TaxFreeCapResult {
    /// The cap amount.
    pub cap: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the tax-free cap for the employee's completed years.
pub fn calculate_tax_free_cap(
    settings: &TaxSettings,
    completed_years: u32,
    step_number: u32,
) -> TaxFreeCapResult {
    let cap = tax_free_cap(
        settings.cap_base_amount,
        settings.cap_per_service_year_amount,
        completed_years,
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax_free_cap".to_string(),
        rule_name: "Tax-Free Cap".to_string(),
        clause_ref: TAX_ESTIMATE_REF.to_string(),
        input: serde_json::json!({
            "cap_base_amount": settings.cap_base_amount.normalize().to_string(),
            "cap_per_service_year_amount": settings.cap_per_service_year_amount.normalize().to_string(),
            "completed_years": completed_years
        }),
        output: serde_json::json!({
            "cap": cap.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} x {} completed years = ${}",
            settings.cap_base_amount.normalize(),
            settings.cap_per_service_year_amount.normalize(),
            completed_years,
            cap.normalize()
        ),
    };

    TaxFreeCapResult { cap, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_settings() -> TaxSettings {
        TaxSettings {
            cap_base_amount: dec("13100"),
            cap_per_service_year_amount: dec("6552"),
            is_under_preservation_age: true,
            etp_tax_rate_under: dec("0.32"),
            etp_tax_rate_over: dec("0.17"),
            leave_withholding_rate: dec("0.32"),
        }
    }

    #[test]
    fn test_cap_with_no_completed_years_is_base() {
        assert_eq!(tax_free_cap(dec("13100"), dec("6552"), 0), dec("13100"));
    }

    #[test]
    fn test_cap_for_2024_25_constants() {
        assert_eq!(tax_free_cap(dec("12524"), dec("6264"), 5), dec("43844"));
    }

    #[test]
    fn test_calculate_tax_free_cap_audit_step() {
        let result = calculate_tax_free_cap(&create_test_settings(), 8, 9);

        assert_eq!(result.cap, dec("65516"));
        assert_eq!(result.audit_step.rule_id, "tax_free_cap");
        assert_eq!(result.audit_step.step_number, 9);
        assert_eq!(result.audit_step.output["cap"], "65516");
        assert!(result.audit_step.reasoning.contains("8 completed years"));
    }

    proptest! {
        #[test]
        fn prop_cap_grows_by_one_increment_per_year(
            base in 0i64..100_000,
            per_year in 0i64..20_000,
            years in 0u32..60,
        ) {
            let base = Decimal::from(base);
            let per_year = Decimal::from(per_year);
            prop_assert_eq!(
                tax_free_cap(base, per_year, years + 1),
                tax_free_cap(base, per_year, years) + per_year
            );
        }
    }
}
