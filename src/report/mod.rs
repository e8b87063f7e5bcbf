//! Presentation of a computed payout: breakdown tables, CSV export and
//! headline figures.

mod breakdown;
mod export;
mod format;
mod kpi;

pub use breakdown::{
    ComponentRow, LABEL_ANNUAL_LEAVE, LABEL_LEAVE_LOADING, LABEL_LONG_SERVICE_LEAVE,
    LABEL_NOTICE_PAY, LABEL_REDUNDANCY_PAY, TaxRow, component_rows, tax_model_rows,
};
pub use export::{
    ExportRow, SECTION_CASH_COMPONENTS, SECTION_TAX_MODEL, export_rows, write_csv,
};
pub use format::{format_currency, format_fixed, format_percent, round_to};
pub use kpi::{KpiChange, KpiSnapshot};
