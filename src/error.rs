//! Error types for the Redundancy Engine.
//!
//! The calculation stages themselves never fail. Errors come from loading
//! configuration, resolving fiscal-year constants, caller-side input
//! validation and CSV export.

use thiserror::Error;

/// The main error type for the Redundancy Engine.
///
/// # Example
///
/// ```
/// use redundancy_engine::error::EngineError;
///
/// let error = EngineError::FiscalYearNotFound {
///     key: "2019-20".to_string(),
/// };
/// assert_eq!(error.to_string(), "Fiscal year not found: 2019-20");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No tax-free cap constants exist for the requested fiscal year.
    #[error("Fiscal year not found: {key}")]
    FiscalYearNotFound {
        /// The fiscal-year label that was requested (e.g. "2025-26").
        key: String,
    },

    /// A caller-supplied input failed validation.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The breakdown could not be serialized for export.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/defaults.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/defaults.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_fiscal_year_not_found_displays_key() {
        let error = EngineError::FiscalYearNotFound {
            key: "2030-31".to_string(),
        };
        assert_eq!(error.to_string(), "Fiscal year not found: 2030-31");
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "annual_salary".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input 'annual_salary': must not be negative"
        );
    }

    #[test]
    fn test_export_error_displays_message() {
        let error = EngineError::ExportError {
            message: "writer closed".to_string(),
        };
        assert_eq!(error.to_string(), "Export failed: writer closed");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_fiscal_year_not_found() -> EngineResult<()> {
            Err(EngineError::FiscalYearNotFound {
                key: "1999-00".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_fiscal_year_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
