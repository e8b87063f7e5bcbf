//! Response types for the Redundancy Engine API.
//!
//! This module defines the success envelopes and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::RedundancyResult;
use crate::report::{ComponentRow, KpiChange, KpiSnapshot, TaxRow};

/// Response body for `/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Fiscal-year key the tax-free cap was resolved against.
    pub fiscal_year: String,
    /// The full calculation result and audit trace.
    pub result: RedundancyResult,
    /// Cash component breakdown.
    pub components: Vec<ComponentRow>,
    /// Tax model breakdown.
    pub tax_model: Vec<TaxRow>,
    /// Headline figures.
    pub kpis: KpiSnapshot,
    /// Figures that changed since the request's `previous_kpis`.
    pub kpi_changes: Vec<KpiChange>,
}

/// One fiscal year's tax-free cap constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYearEntry {
    /// Fiscal-year key.
    pub key: String,
    /// Base amount.
    pub base: Decimal,
    /// Amount per completed year of service.
    pub service: Decimal,
}

/// Response body for `/fiscal-years`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYearsResponse {
    /// Key used when a request names no fiscal year.
    pub default_fiscal_year: String,
    /// Known fiscal years, newest first.
    pub fiscal_years: Vec<FiscalYearEntry>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a fiscal year not found error response.
    pub fn fiscal_year_not_found(key: &str) -> Self {
        Self::with_details(
            "FISCAL_YEAR_NOT_FOUND",
            format!("Fiscal year not found: {}", key),
            "Supply both cap amounts to calculate for a fiscal year without built-in constants",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response for the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::FiscalYearNotFound { key } => {
                ApiErrorResponse::bad_request(ApiError::fiscal_year_not_found(&key))
            }
            EngineError::InvalidInput { field, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid input '{}': {}", field, message),
                    "The request contains an out-of-range amount or rate",
                ))
            }
            EngineError::ExportError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_fiscal_year_not_found_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::FiscalYearNotFound {
            key: "1999-00".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "FISCAL_YEAR_NOT_FOUND");
        assert!(api_error.error.message.contains("1999-00"));
    }

    #[test]
    fn test_invalid_input_maps_to_validation_error() {
        let api_error: ApiErrorResponse = EngineError::InvalidInput {
            field: "annual_salary".to_string(),
            message: "must not be negative (got -1)".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert!(api_error.error.message.contains("annual_salary"));
    }

    #[test]
    fn test_config_and_export_errors_map_to_500() {
        let config: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "missing.yaml".to_string(),
        }
        .into();
        assert_eq!(config.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.error.code, "CONFIG_ERROR");

        let export: ApiErrorResponse = EngineError::ExportError {
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(export.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(export.error.code, "EXPORT_ERROR");
    }
}
