//! Flat-rate withholding on leave payouts and worked notice.
//!
//! Notice paid in lieu already sits in the ETP pool, so it is never
//! withheld here as well.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CashComponents, NoticeTreatment};

use super::tax_free_cap::TAX_ESTIMATE_REF;

/// Withholding amounts, including the audit step.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// Withholding on annual leave, long service leave and loading.
    pub leave_tax: Decimal,
    /// Withholding on worked notice (0 when paid in lieu).
    pub notice_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the withholding rate to leave and, for worked notice, to notice pay.
pub fn calculate_withholding(
    cash: &CashComponents,
    withholding_rate: Decimal,
    notice_treatment: NoticeTreatment,
    step_number: u32,
) -> WithholdingResult {
    let leave_tax = cash.leave_gross * withholding_rate;
    let notice_tax = match notice_treatment {
        NoticeTreatment::PaidInLieu => Decimal::ZERO,
        NoticeTreatment::WorkedOut => cash.notice_gross * withholding_rate,
    };

    let notice_reasoning = match notice_treatment {
        NoticeTreatment::PaidInLieu => "notice paid in lieu is taxed in the ETP pool".to_string(),
        NoticeTreatment::WorkedOut => format!(
            "notice ${} x {} = ${}",
            cash.notice_gross.round_dp(2),
            withholding_rate.normalize(),
            notice_tax.round_dp(2)
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding".to_string(),
        rule_name: "Leave and Notice Withholding".to_string(),
        clause_ref: TAX_ESTIMATE_REF.to_string(),
        input: serde_json::json!({
            "leave_gross": cash.leave_gross.normalize().to_string(),
            "notice_gross": cash.notice_gross.normalize().to_string(),
            "withholding_rate": withholding_rate.normalize().to_string(),
            "notice_treatment": notice_treatment
        }),
        output: serde_json::json!({
            "leave_tax": leave_tax.normalize().to_string(),
            "notice_tax": notice_tax.normalize().to_string()
        }),
        reasoning: format!(
            "leave ${} x {} = ${}; {}",
            cash.leave_gross.round_dp(2),
            withholding_rate.normalize(),
            leave_tax.round_dp(2),
            notice_reasoning
        ),
    };

    WithholdingResult {
        leave_tax,
        notice_tax,
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
            leave_loading_gross: dec("700"),
            leave_gross: dec("12700"),
        }
    }

    #[test]
    fn test_leave_withholding() {
        let result =
            calculate_withholding(&create_test_cash(), dec("0.32"), NoticeTreatment::PaidInLieu, 11);
        assert_eq!(result.leave_tax, dec("4064"));
    }

    #[test]
    fn test_notice_in_lieu_is_not_withheld() {
        let result =
            calculate_withholding(&create_test_cash(), dec("0.32"), NoticeTreatment::PaidInLieu, 11);
        assert_eq!(result.notice_tax, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("ETP pool"));
    }

    #[test]
    fn test_worked_notice_is_withheld() {
        let result =
            calculate_withholding(&create_test_cash(), dec("0.32"), NoticeTreatment::WorkedOut, 11);
        assert_eq!(result.notice_tax, dec("5120"));
        assert_eq!(result.audit_step.output["notice_tax"], "5120");
    }

    #[test]
    fn test_zero_rate_withholds_nothing() {
        let result =
            calculate_withholding(&create_test_cash(), Decimal::ZERO, NoticeTreatment::WorkedOut, 11);
        assert_eq!(result.leave_tax, Decimal::ZERO);
        assert_eq!(result.notice_tax, Decimal::ZERO);
    }
}
