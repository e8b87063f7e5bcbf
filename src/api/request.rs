//! Request types for the Redundancy Engine API.
//!
//! Optional fields fall back to the agreement defaults and the default
//! fiscal year from the loaded configuration.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{RedundancyInputs, TaxSettings};
use crate::report::KpiSnapshot;

/// Request body for the `/calculate` and `/export` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Salary and the three key dates.
    pub employee: EmployeeRequest,
    /// Notice and leave quantities.
    pub cash_components: CashComponentsRequest,
    /// Tax estimate settings.
    #[serde(default)]
    pub tax: TaxRequest,
    /// Headline figures from the caller's previous calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_kpis: Option<KpiSnapshot>,
}

/// Employee information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Annual base salary, excluding superannuation.
    pub annual_salary: Decimal,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Continuous service start date.
    pub start_date: NaiveDate,
    /// Date notice of redundancy is given.
    pub notice_date: NaiveDate,
}

/// Notice and leave quantities in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashComponentsRequest {
    /// Weeks of notice. Defaults to the agreement default.
    #[serde(default)]
    pub notice_weeks: Option<Decimal>,
    /// Whether notice is paid in lieu.
    #[serde(default)]
    pub notice_paid_in_lieu: Option<bool>,
    /// Unused annual leave in working days.
    pub unused_annual_leave_days: Decimal,
    /// Unused long service leave in weeks.
    pub unused_long_service_leave_weeks: Decimal,
    /// Whether to add annual leave loading.
    #[serde(default)]
    pub include_annual_leave_loading: Option<bool>,
    /// Loading fraction applied to the annual leave payout.
    #[serde(default)]
    pub annual_leave_loading_pct: Option<Decimal>,
}

/// Tax estimate settings in a calculation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRequest {
    /// Fiscal-year key for the tax-free cap constants (e.g. "2025-26").
    #[serde(default)]
    pub fiscal_year: Option<String>,
    /// Overrides the fiscal year's base amount.
    #[serde(default)]
    pub cap_base_amount: Option<Decimal>,
    /// Overrides the fiscal year's per-service-year amount.
    #[serde(default)]
    pub cap_per_service_year_amount: Option<Decimal>,
    /// Whether the employee is under preservation age.
    #[serde(default)]
    pub under_preservation_age: Option<bool>,
    /// ETP rate under preservation age.
    #[serde(default)]
    pub etp_tax_rate_under: Option<Decimal>,
    /// ETP rate at or over preservation age.
    #[serde(default)]
    pub etp_tax_rate_over: Option<Decimal>,
    /// Withholding rate for leave and worked notice.
    #[serde(default)]
    pub leave_withholding_rate: Option<Decimal>,
}

/// A request with every default applied.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    /// The fiscal-year key the request was resolved against.
    pub fiscal_year: String,
    /// Complete engine inputs.
    pub inputs: RedundancyInputs,
}

impl CalculationRequest {
    /// Applies configuration defaults and validates the result.
    pub fn resolve(&self, config: &ConfigLoader) -> EngineResult<ResolvedRequest> {
        let defaults = config.defaults();
        let fiscal_year = self
            .tax
            .fiscal_year
            .clone()
            .unwrap_or_else(|| config.default_fiscal_year().to_string());
        let cap = config.resolve_tax_free_cap(
            &fiscal_year,
            self.tax.cap_base_amount,
            self.tax.cap_per_service_year_amount,
        )?;

        let cash = &self.cash_components;
        let inputs = RedundancyInputs {
            annual_salary: self.employee.annual_salary,
            date_of_birth: self.employee.date_of_birth,
            start_date: self.employee.start_date,
            notice_date: self.employee.notice_date,
            notice_weeks: cash.notice_weeks.unwrap_or(defaults.notice_weeks),
            notice_paid_in_lieu: cash
                .notice_paid_in_lieu
                .unwrap_or(defaults.notice_paid_in_lieu),
            unused_annual_leave_days: cash.unused_annual_leave_days,
            unused_long_service_leave_weeks: cash.unused_long_service_leave_weeks,
            include_annual_leave_loading: cash
                .include_annual_leave_loading
                .unwrap_or(defaults.include_annual_leave_loading),
            annual_leave_loading_pct: cash
                .annual_leave_loading_pct
                .unwrap_or(defaults.annual_leave_loading_pct),
            tax: TaxSettings {
                cap_base_amount: cap.base,
                cap_per_service_year_amount: cap.service,
                is_under_preservation_age: self
                    .tax
                    .under_preservation_age
                    .unwrap_or(defaults.under_preservation_age),
                etp_tax_rate_under: self
                    .tax
                    .etp_tax_rate_under
                    .unwrap_or(defaults.etp_tax_rate_under_preservation),
                etp_tax_rate_over: self
                    .tax
                    .etp_tax_rate_over
                    .unwrap_or(defaults.etp_tax_rate_over_preservation),
                leave_withholding_rate: self
                    .tax
                    .leave_withholding_rate
                    .unwrap_or(defaults.leave_withholding_rate),
            },
        };
        inputs.validate()?;

        Ok(ResolvedRequest {
            fiscal_year,
            inputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_config() -> ConfigLoader {
        ConfigLoader::load("./config/paso").expect("Failed to load config")
    }

    fn minimal_json() -> &'static str {
        r#"{
            "employee": {
                "annual_salary": "158000",
                "date_of_birth": "1992-08-12",
                "start_date": "2021-10-11",
                "notice_date": "2029-10-11"
            },
            "cash_components": {
                "unused_annual_leave_days": "5",
                "unused_long_service_leave_weeks": "4"
            }
        }"#
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let request: CalculationRequest = serde_json::from_str(minimal_json()).unwrap();

        assert_eq!(request.employee.annual_salary, dec("158000"));
        assert_eq!(request.cash_components.notice_weeks, None);
        assert_eq!(request.tax.fiscal_year, None);
        assert!(request.previous_kpis.is_none());
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let request: CalculationRequest = serde_json::from_str(minimal_json()).unwrap();
        let resolved = request.resolve(&create_test_config()).unwrap();

        assert_eq!(resolved.fiscal_year, "2025-26");
        let inputs = resolved.inputs;
        assert_eq!(inputs.notice_weeks, dec("8"));
        assert!(inputs.notice_paid_in_lieu);
        assert!(!inputs.include_annual_leave_loading);
        assert_eq!(inputs.annual_leave_loading_pct, dec("0.175"));
        assert_eq!(inputs.tax.cap_base_amount, dec("13100"));
        assert_eq!(inputs.tax.cap_per_service_year_amount, dec("6552"));
        assert!(inputs.tax.is_under_preservation_age);
        assert_eq!(inputs.tax.etp_tax_rate_under, dec("0.32"));
        assert_eq!(inputs.tax.etp_tax_rate_over, dec("0.17"));
        assert_eq!(inputs.tax.leave_withholding_rate, dec("0.32"));
    }

    #[test]
    fn test_resolve_uses_requested_fiscal_year() {
        let mut request: CalculationRequest = serde_json::from_str(minimal_json()).unwrap();
        request.tax.fiscal_year = Some("2023-24".to_string());
        request.tax.cap_per_service_year_amount = Some(dec("7000"));
        let resolved = request.resolve(&create_test_config()).unwrap();

        assert_eq!(resolved.fiscal_year, "2023-24");
        assert_eq!(resolved.inputs.tax.cap_base_amount, dec("11985"));
        assert_eq!(resolved.inputs.tax.cap_per_service_year_amount, dec("7000"));
    }

    #[test]
    fn test_resolve_unknown_fiscal_year() {
        let mut request: CalculationRequest = serde_json::from_str(minimal_json()).unwrap();
        request.tax.fiscal_year = Some("1999-00".to_string());

        let result = request.resolve(&create_test_config());
        assert!(matches!(
            result,
            Err(EngineError::FiscalYearNotFound { ref key }) if key == "1999-00"
        ));
    }

    #[test]
    fn test_resolve_rejects_negative_salary() {
        let mut request: CalculationRequest = serde_json::from_str(minimal_json()).unwrap();
        request.employee.annual_salary = dec("-1");

        let result = request.resolve(&create_test_config());
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "annual_salary"
        ));
    }
}
