//! CSV export of the breakdown tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::breakdown::{ComponentRow, TaxRow};
use super::format::round_to;

/// Section name for cash component rows.
pub const SECTION_CASH_COMPONENTS: &str = "Cash components";
/// Section name for tax model rows.
pub const SECTION_TAX_MODEL: &str = "Tax model";

/// One exported line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Section the row belongs to.
    #[serde(rename = "Section")]
    pub section: String,
    /// Row label.
    #[serde(rename = "Label")]
    pub label: String,
    /// Amount at two decimal places.
    #[serde(rename = "Value")]
    pub value: Decimal,
}

/// Flattens the component and tax tables into export rows.
pub fn export_rows(components: &[ComponentRow], tax_rows: &[TaxRow]) -> Vec<ExportRow> {
    let cash = components
        .iter()
        .map(|row| export_row(SECTION_CASH_COMPONENTS, &row.component, row.gross));
    let tax = tax_rows
        .iter()
        .map(|row| export_row(SECTION_TAX_MODEL, &row.bucket, row.amount));

    cash.chain(tax).collect()
}

fn export_row(section: &str, label: &str, amount: Decimal) -> ExportRow {
    let mut value = round_to(amount, 2);
    value.rescale(2);
    ExportRow {
        section: section.to_string(),
        label: label.to_string(),
        value,
    }
}

/// Writes rows as CSV with a `Section,Label,Value` header.
pub fn write_csv(rows: &[ExportRow]) -> EngineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(|e| EngineError::ExportError {
            message: e.to_string(),
        })?;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}
