//! Derived facts and totals produced by a payout calculation.
//!
//! Every type here is a value object rebuilt from scratch on each call to
//! [`compute`](crate::calculation::compute).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::split_months;

use super::AuditTrace;

/// Length of continuous service, truncated to whole calendar months.
///
/// Invariant: `years * 12 + months == completed_months` and `months < 12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDuration {
    /// Total completed calendar months.
    pub completed_months: u32,
    /// Completed years.
    pub years: u32,
    /// Remaining completed months (0-11).
    pub months: u32,
}

impl ServiceDuration {
    /// Splits a completed-month count into years and months.
    ///
    /// ```
    /// use redundancy_engine::models::ServiceDuration;
    ///
    /// let service = ServiceDuration::from_completed_months(29);
    /// assert_eq!((service.years, service.months), (2, 5));
    /// ```
    pub fn from_completed_months(completed_months: u32) -> Self {
        let (years, months) = split_months(completed_months);
        Self {
            completed_months,
            years,
            months,
        }
    }
}

/// The redundancy-weeks entitlement.
///
/// Invariant: `weeks == 0` or `14 <= weeks <= 52`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundancyEntitlement {
    /// Final entitlement in weeks, after the floor/ceiling clamp.
    pub weeks: Decimal,
    /// Weeks from service alone (3 per year plus 0.25 per month).
    pub base_weeks: Decimal,
    /// Weeks added by the 45+ rule (0 or 2).
    pub age_bonus_weeks: Decimal,
    /// Whether the employee was 45 or older on the notice date.
    pub is_age_boost_eligible: bool,
}

/// Gross amounts of each cash component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashComponents {
    /// Redundancy pay.
    pub redundancy_gross: Decimal,
    /// Notice pay.
    pub notice_gross: Decimal,
    /// Unused annual leave payout.
    pub annual_leave_gross: Decimal,
    /// Unused long service leave payout.
    pub long_service_leave_gross: Decimal,
    /// Annual leave loading (0 when loading is not included).
    pub leave_loading_gross: Decimal,
    /// Annual leave + long service leave + loading.
    pub leave_gross: Decimal,
}

/// The employment termination payment assessment.
///
/// Invariant: `taxable_etp == max(0, etp_gross - tax_free_cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtpAssessment {
    /// Redundancy pay plus notice paid in lieu.
    pub etp_gross: Decimal,
    /// Tax-free cap for the employee's completed years.
    pub tax_free_cap: Decimal,
    /// The part of the ETP pool above the cap.
    pub taxable_etp: Decimal,
    /// The flat rate applied to the taxable slice.
    pub applied_rate: Decimal,
    /// Tax on the taxable slice.
    pub etp_tax: Decimal,
}

/// Aggregated gross, tax and net figures.
///
/// Invariant: `total_net == total_gross - total_tax` and `total_tax >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxEstimate {
    /// Tax on the taxable ETP.
    pub etp_tax: Decimal,
    /// Withholding on leave payouts.
    pub leave_tax: Decimal,
    /// Withholding on worked notice (0 when notice is paid in lieu).
    pub notice_tax: Decimal,
    /// Redundancy + notice + leave, regardless of notice treatment.
    pub total_gross: Decimal,
    /// Sum of all tax components.
    pub total_tax: Decimal,
    /// Gross minus tax.
    pub total_net: Decimal,
}

/// The complete, deterministic result of a payout calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundancyResult {
    /// Annual salary / 52.
    pub weekly_pay: Decimal,
    /// Weekly pay / 5.
    pub day_rate: Decimal,
    /// Service from start date to notice date.
    pub service: ServiceDuration,
    /// Age in whole years on the notice date.
    pub age_on_notice: u32,
    /// Redundancy-weeks entitlement.
    pub redundancy: RedundancyEntitlement,
    /// Gross cash components.
    pub cash: CashComponents,
    /// ETP pool, cap and tax.
    pub etp: EtpAssessment,
    /// Tax and net totals.
    pub tax: TaxEstimate,
    /// Steps and warnings recorded while calculating.
    pub audit_trace: AuditTrace,
}
