//! Configuration types for redundancy payout estimation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata about the enterprise agreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementMetadata {
    /// Short code for the agreement stream (e.g., "PASO").
    pub code: String,
    /// The human-readable name of the agreement.
    pub name: String,
    /// A short description of what the calculator covers.
    pub description: String,
    /// External references shown alongside the estimate.
    #[serde(default)]
    pub references: Vec<AgreementReference>,
}

/// A labelled external link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementReference {
    /// Display label.
    pub label: String,
    /// Target URL.
    pub url: String,
}

/// Tax-free cap constants for a single fiscal year.
///
/// The cap for an employee is `base + service * completed_years`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxFreeCapConstants {
    /// The flat base amount.
    pub base: Decimal,
    /// The amount added per completed year of service.
    pub service: Decimal,
}

/// Tax-free caps configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxFreeCapsConfig {
    /// The fiscal year used when a request does not name one.
    pub default_fiscal_year: String,
    /// Map of fiscal-year label (e.g. "2025-26") to cap constants.
    pub fiscal_years: BTreeMap<String, TaxFreeCapConstants>,
}

/// Default values for inputs a caller may leave out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineDefaults {
    /// Notice period in weeks.
    pub notice_weeks: Decimal,
    /// Whether notice is paid out instead of worked.
    pub notice_paid_in_lieu: bool,
    /// Whether annual leave loading is added to the leave payout.
    pub include_annual_leave_loading: bool,
    /// Annual leave loading as a fraction (0.175 = 17.5%).
    pub annual_leave_loading_pct: Decimal,
    /// Whether the employee is under preservation age.
    pub under_preservation_age: bool,
    /// Flat ETP rate applied under preservation age.
    pub etp_tax_rate_under_preservation: Decimal,
    /// Flat ETP rate applied at or over preservation age.
    pub etp_tax_rate_over_preservation: Decimal,
    /// Flat withholding rate for leave (and worked notice).
    pub leave_withholding_rate: Decimal,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            notice_weeks: Decimal::from(8),
            notice_paid_in_lieu: true,
            include_annual_leave_loading: false,
            annual_leave_loading_pct: Decimal::new(175, 3),
            under_preservation_age: true,
            etp_tax_rate_under_preservation: Decimal::new(32, 2),
            etp_tax_rate_over_preservation: Decimal::new(17, 2),
            leave_withholding_rate: Decimal::new(32, 2),
        }
    }
}

/// The complete agreement configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct AgreementConfig {
    metadata: AgreementMetadata,
    tax_free_caps: BTreeMap<String, TaxFreeCapConstants>,
    default_fiscal_year: String,
    defaults: EngineDefaults,
}

impl AgreementConfig {
    /// Creates a new AgreementConfig from its component parts.
    pub fn new(
        metadata: AgreementMetadata,
        tax_free_caps: BTreeMap<String, TaxFreeCapConstants>,
        default_fiscal_year: String,
        defaults: EngineDefaults,
    ) -> Self {
        Self {
            metadata,
            tax_free_caps,
            default_fiscal_year,
            defaults,
        }
    }

    /// Returns the agreement metadata.
    pub fn agreement(&self) -> &AgreementMetadata {
        &self.metadata
    }

    /// Returns all tax-free cap constants keyed by fiscal year.
    pub fn tax_free_caps(&self) -> &BTreeMap<String, TaxFreeCapConstants> {
        &self.tax_free_caps
    }

    /// Returns the default fiscal-year label.
    pub fn default_fiscal_year(&self) -> &str {
        &self.default_fiscal_year
    }

    /// Returns the input defaults.
    pub fn defaults(&self) -> &EngineDefaults {
        &self.defaults
    }
}
