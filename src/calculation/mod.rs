//! Calculation logic for the Redundancy Engine.
//!
//! Three pure stages feed one another: service and age evaluation, the
//! entitlement calculation (redundancy weeks, pay rates and gross cash
//! components), and the tax estimate (tax-free cap, ETP tax, withholding
//! and totals). [`compute`] runs them in order.

mod cash_components;
mod etp;
mod pay_rates;
mod payout;
mod redundancy_weeks;
mod service;
mod tax_free_cap;
mod withholding;

pub use cash_components::{
    ANNUAL_LEAVE_CLAUSE, CashComponentsResult, LONG_SERVICE_LEAVE_CLAUSE, NOTICE_CLAUSE,
    calculate_cash_components, leave_loading,
};
pub use etp::{EtpTaxResult, calculate_etp_tax, etp_pool, taxable_etp};
pub use pay_rates::{
    PayRatesResult, WEEKS_PER_YEAR, WORKING_DAYS_PER_WEEK, calculate_pay_rates, day_rate,
    weekly_pay,
};
pub use payout::{
    WARNING_NOTICE_BEFORE_START, WARNING_RATE_OUT_OF_RANGE, WARNING_START_BEFORE_BIRTH,
    aggregate_totals, collect_input_warnings, compute,
};
pub use redundancy_weeks::{
    AGE_BOOST_THRESHOLD, AGE_BOOST_WEEKS, MAX_REDUNDANCY_WEEKS, MIN_REDUNDANCY_WEEKS,
    REDUNDANCY_PAY_CLAUSE, RedundancyWeeksResult, WEEKS_PER_COMPLETED_MONTH,
    WEEKS_PER_COMPLETED_YEAR, calculate_redundancy_weeks, redundancy_weeks,
};
pub use service::{
    SERVICE_CLAUSE, ServiceEvaluation, age_on, completed_months_between, evaluate_service,
    split_months,
};
pub use tax_free_cap::{TAX_ESTIMATE_REF, TaxFreeCapResult, calculate_tax_free_cap, tax_free_cap};
pub use withholding::{WithholdingResult, calculate_withholding};
