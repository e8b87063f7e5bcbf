//! Component and tax-model breakdown tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{NoticeTreatment, RedundancyInputs, RedundancyResult};

use super::format::{format_currency, format_fixed, format_percent, round_to};

/// Component label for redundancy pay.
pub const LABEL_REDUNDANCY_PAY: &str = "Redundancy pay";
/// Component label for notice pay.
pub const LABEL_NOTICE_PAY: &str = "Notice pay";
/// Component label for the annual leave payout.
pub const LABEL_ANNUAL_LEAVE: &str = "Annual leave payout";
/// Component label for the long service leave payout.
pub const LABEL_LONG_SERVICE_LEAVE: &str = "LSL payout";
/// Component label for annual leave loading.
pub const LABEL_LEAVE_LOADING: &str = "Annual leave loading";

/// One row of the cash component breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRow {
    /// Component label.
    pub component: String,
    /// Rate the quantity is paid at (none for leave loading).
    pub rate: Option<Decimal>,
    /// Human-readable quantity, e.g. "24.00 weeks".
    pub quantity: String,
    /// Gross amount.
    pub gross: Decimal,
    /// Share of total gross as a percentage, one decimal place.
    pub share_pct: Decimal,
    /// Rate as dollars, empty when there is no rate.
    pub rate_display: String,
    /// Gross as dollars.
    pub gross_display: String,
}

/// One row of the tax model table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRow {
    /// Bucket label.
    pub bucket: String,
    /// Amount for the bucket.
    pub amount: Decimal,
    /// Amount as dollars.
    pub amount_display: String,
}

/// Builds the five cash component rows in display order.
pub fn component_rows(inputs: &RedundancyInputs, result: &RedundancyResult) -> Vec<ComponentRow> {
    let cash = &result.cash;
    let loading_quantity = if inputs.include_annual_leave_loading {
        format_fixed(inputs.annual_leave_loading_pct, 3)
    } else {
        "Off".to_string()
    };

    let rows = [
        (
            LABEL_REDUNDANCY_PAY,
            Some(result.weekly_pay),
            format!("{} weeks", format_fixed(result.redundancy.weeks, 2)),
            cash.redundancy_gross,
        ),
        (
            LABEL_NOTICE_PAY,
            Some(result.weekly_pay),
            format!("{} weeks", format_fixed(inputs.notice_weeks, 2)),
            cash.notice_gross,
        ),
        (
            LABEL_ANNUAL_LEAVE,
            Some(result.day_rate),
            format!("{} days", format_fixed(inputs.unused_annual_leave_days, 1)),
            cash.annual_leave_gross,
        ),
        (
            LABEL_LONG_SERVICE_LEAVE,
            Some(result.weekly_pay),
            format!("{} weeks", format_fixed(inputs.unused_long_service_leave_weeks, 2)),
            cash.long_service_leave_gross,
        ),
        (LABEL_LEAVE_LOADING, None, loading_quantity, cash.leave_loading_gross),
    ];

    let total: Decimal = rows.iter().map(|(_, _, _, gross)| *gross).sum();

    rows.into_iter()
        .map(|(component, rate, quantity, gross)| ComponentRow {
            component: component.to_string(),
            rate,
            quantity,
            gross,
            share_pct: share_of(gross, total),
            rate_display: rate.map(format_currency).unwrap_or_default(),
            gross_display: format_currency(gross),
        })
        .collect()
}

fn share_of(gross: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        round_to(gross / total * Decimal::ONE_HUNDRED, 1)
    }
}

/// Builds the tax model rows.
///
/// The notice withholding row only appears when notice is worked out;
/// notice paid in lieu is already inside the ETP pool row.
pub fn tax_model_rows(inputs: &RedundancyInputs, result: &RedundancyResult) -> Vec<TaxRow> {
    let withholding_rate = format_percent(inputs.tax.leave_withholding_rate);

    let mut rows = vec![
        TaxRow::new(
            "ETP pool gross (redundancy + notice in lieu)",
            result.etp.etp_gross,
        ),
        TaxRow::new("Tax free cap", result.etp.tax_free_cap),
        TaxRow::new("Taxable ETP", result.etp.taxable_etp),
        TaxRow::new(
            format!("ETP tax (@ {})", format_percent(result.etp.applied_rate)),
            result.tax.etp_tax,
        ),
        TaxRow::new("Leave gross (AL + LSL + loading)", result.cash.leave_gross),
        TaxRow::new(
            format!("Leave withholding (@ {})", withholding_rate),
            result.tax.leave_tax,
        ),
    ];

    if inputs.notice_treatment() == NoticeTreatment::WorkedOut {
        rows.push(TaxRow::new(
            format!("Notice withholding (@ {})", withholding_rate),
            result.tax.notice_tax,
        ));
    }

    rows
}

impl TaxRow {
    fn new(bucket: impl Into<String>, amount: Decimal) -> Self {
        Self {
            bucket: bucket.into(),
            amount,
            amount_display: format_currency(amount),
        }
    }
}
