//! Calculation inputs.
//!
//! [`RedundancyInputs`] is the full input record for a single payout
//! estimate. It is immutable for the lifetime of a calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest annual salary accepted by [`RedundancyInputs::validate`].
pub const MAX_ANNUAL_SALARY: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Largest notice or long service leave quantity, in weeks.
pub const MAX_LEAVE_WEEKS: Decimal = Decimal::from_parts(520, 0, 0, false, 0);

/// Largest unused annual leave balance, in working days.
pub const MAX_ANNUAL_LEAVE_DAYS: Decimal = Decimal::from_parts(2_600, 0, 0, false, 0);

/// Largest tax-free cap base or per-year amount.
pub const MAX_CAP_AMOUNT: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// How the notice period is paid out.
///
/// Resolved once per calculation. Notice paid in lieu joins the ETP pool;
/// worked notice is withheld like ordinary leave income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeTreatment {
    /// The employer pays out the notice period instead of it being worked.
    PaidInLieu,
    /// The notice period is worked as continued employment.
    WorkedOut,
}

impl NoticeTreatment {
    /// Maps the `notice_paid_in_lieu` flag to a treatment.
    pub fn from_paid_in_lieu(paid_in_lieu: bool) -> Self {
        if paid_in_lieu {
            NoticeTreatment::PaidInLieu
        } else {
            NoticeTreatment::WorkedOut
        }
    }

    /// Returns true if the notice amount belongs in the ETP pool.
    pub fn is_paid_in_lieu(self) -> bool {
        self == NoticeTreatment::PaidInLieu
    }
}

/// Tax-estimate settings, already resolved from fiscal-year defaults and
/// caller overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Flat base of the tax-free cap.
    pub cap_base_amount: Decimal,
    /// Tax-free cap increment per completed year of service.
    pub cap_per_service_year_amount: Decimal,
    /// Selects which of the two ETP rates applies.
    pub is_under_preservation_age: bool,
    /// ETP rate under preservation age.
    pub etp_tax_rate_under: Decimal,
    /// ETP rate at or over preservation age.
    pub etp_tax_rate_over: Decimal,
    /// Withholding rate for leave payouts and worked notice.
    pub leave_withholding_rate: Decimal,
}

impl TaxSettings {
    /// Returns the single ETP rate that applies to this employee.
    pub fn applicable_etp_rate(&self) -> Decimal {
        if self.is_under_preservation_age {
            self.etp_tax_rate_under
        } else {
            self.etp_tax_rate_over
        }
    }
}

/// The full input record for a redundancy payout estimate.
///
/// # Example
///
/// ```
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
/// assert!(inputs.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedundancyInputs {
    /// Base annual salary, excluding superannuation.
    pub annual_salary: Decimal,
    /// The employee's date of birth (used for the 45+ rule).
    pub date_of_birth: NaiveDate,
    /// Start of continuous service.
    pub start_date: NaiveDate,
    /// Date the redundancy notice was given.
    pub notice_date: NaiveDate,
    /// Notice period in weeks.
    pub notice_weeks: Decimal,
    /// Whether notice is paid out instead of worked.
    pub notice_paid_in_lieu: bool,
    /// Unused annual leave, in days.
    pub unused_annual_leave_days: Decimal,
    /// Unused long service leave, in weeks.
    pub unused_long_service_leave_weeks: Decimal,
    /// Whether annual leave loading is paid on the annual leave payout.
    pub include_annual_leave_loading: bool,
    /// Annual leave loading as a fraction of the annual leave payout.
    pub annual_leave_loading_pct: Decimal,
    /// Tax-estimate settings.
    pub tax: TaxSettings,
}

impl RedundancyInputs {
    /// Returns the notice treatment for this calculation.
    pub fn notice_treatment(&self) -> NoticeTreatment {
        NoticeTreatment::from_paid_in_lieu(self.notice_paid_in_lieu)
    }

    /// Caller-side validation of amounts and rates.
    ///
    /// Amounts must lie between 0 and their ceiling; within those bounds
    /// [`compute`](crate::calculation::compute) cannot overflow. The
    /// calculation engine does not call this; it absorbs whatever it is
    /// given. Date ordering is deliberately not checked here (out-of-order
    /// dates produce warnings, not errors).
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("annual_salary", self.annual_salary, MAX_ANNUAL_SALARY),
            ("notice_weeks", self.notice_weeks, MAX_LEAVE_WEEKS),
            (
                "unused_annual_leave_days",
                self.unused_annual_leave_days,
                MAX_ANNUAL_LEAVE_DAYS,
            ),
            (
                "unused_long_service_leave_weeks",
                self.unused_long_service_leave_weeks,
                MAX_LEAVE_WEEKS,
            ),
            ("cap_base_amount", self.tax.cap_base_amount, MAX_CAP_AMOUNT),
            (
                "cap_per_service_year_amount",
                self.tax.cap_per_service_year_amount,
                MAX_CAP_AMOUNT,
            ),
        ];
        for (field, value, max) in amounts {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not be negative (got {})", value),
                });
            }
            if value > max {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not exceed {} (got {})", max, value),
                });
            }
        }

        for (field, value) in self.rates() {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must be between 0 and 1 (got {})", value),
                });
            }
        }

        Ok(())
    }

    /// All fractional rates with their field names.
    pub(crate) fn rates(&self) -> [(&'static str, Decimal); 4] {
        [
            ("annual_leave_loading_pct", self.annual_leave_loading_pct),
            ("etp_tax_rate_under", self.tax.etp_tax_rate_under),
            ("etp_tax_rate_over", self.tax.etp_tax_rate_over),
            ("leave_withholding_rate", self.tax.leave_withholding_rate),
        ]
    }
}
