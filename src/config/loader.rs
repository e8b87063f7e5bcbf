//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading agreement
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AgreementConfig, AgreementMetadata, EngineDefaults, TaxFreeCapConstants, TaxFreeCapsConfig,
};

/// Loads and provides access to agreement configuration.
///
/// # Directory Structure
///
/// ```text
/// config/paso/
/// ├── agreement.yaml      # Agreement metadata and references
/// ├── tax_free_caps.yaml  # Tax-free cap constants by fiscal year
/// └── defaults.yaml       # Defaults for optional inputs
/// ```
///
/// # Example
///
/// ```no_run
/// use redundancy_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/paso").unwrap();
/// let caps = loader.tax_free_cap_constants("2025-26").unwrap();
/// println!("Base: ${}, per year: ${}", caps.base, caps.service);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AgreementConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or if the default fiscal year has no cap constants.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<AgreementMetadata>(&path.join("agreement.yaml"))?;
        let caps = Self::load_yaml::<TaxFreeCapsConfig>(&path.join("tax_free_caps.yaml"))?;
        let defaults = Self::load_yaml::<EngineDefaults>(&path.join("defaults.yaml"))?;

        if !caps.fiscal_years.contains_key(&caps.default_fiscal_year) {
            return Err(EngineError::ConfigParseError {
                path: path.join("tax_free_caps.yaml").display().to_string(),
                message: format!(
                    "default_fiscal_year '{}' has no cap constants",
                    caps.default_fiscal_year
                ),
            });
        }

        info!(
            agreement = %metadata.code,
            fiscal_years = caps.fiscal_years.len(),
            default_fiscal_year = %caps.default_fiscal_year,
            "Loaded agreement configuration"
        );

        Ok(Self::from_config(AgreementConfig::new(
            metadata,
            caps.fiscal_years,
            caps.default_fiscal_year,
            defaults,
        )))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AgreementConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying agreement configuration.
    pub fn config(&self) -> &AgreementConfig {
        &self.config
    }

    /// Returns the agreement metadata.
    pub fn agreement(&self) -> &AgreementMetadata {
        self.config.agreement()
    }

    /// Returns the input defaults.
    pub fn defaults(&self) -> &EngineDefaults {
        self.config.defaults()
    }

    /// Returns the default fiscal-year label.
    pub fn default_fiscal_year(&self) -> &str {
        self.config.default_fiscal_year()
    }

    /// Returns every configured fiscal year, newest first.
    pub fn fiscal_years(&self) -> impl Iterator<Item = (&str, &TaxFreeCapConstants)> {
        self.config
            .tax_free_caps()
            .iter()
            .rev()
            .map(|(key, caps)| (key.as_str(), caps))
    }

    /// Gets the tax-free cap constants for a fiscal year.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use redundancy_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/paso")?;
    /// let caps = loader.tax_free_cap_constants("2024-25")?;
    /// assert_eq!(caps.base.to_string(), "12524");
    /// # Ok::<(), redundancy_engine::error::EngineError>(())
    /// ```
    pub fn tax_free_cap_constants(&self, fiscal_year: &str) -> EngineResult<TaxFreeCapConstants> {
        self.config
            .tax_free_caps()
            .get(fiscal_year)
            .copied()
            .ok_or_else(|| EngineError::FiscalYearNotFound {
                key: fiscal_year.to_string(),
            })
    }

    /// Resolves the cap constants to use for a calculation.
    ///
    /// Explicit overrides win over the fiscal-year lookup. When both
    /// overrides are supplied the fiscal year is not consulted at all, so an
    /// unknown key is only an error if one of the values has to come from it.
    pub fn resolve_tax_free_cap(
        &self,
        fiscal_year: &str,
        base_override: Option<Decimal>,
        service_override: Option<Decimal>,
    ) -> EngineResult<TaxFreeCapConstants> {
        if let (Some(base), Some(service)) = (base_override, service_override) {
            return Ok(TaxFreeCapConstants { base, service });
        }

        let looked_up = self.tax_free_cap_constants(fiscal_year)?;
        Ok(TaxFreeCapConstants {
            base: base_override.unwrap_or(looked_up.base),
            service: service_override.unwrap_or(looked_up.service),
        })
    }
}
