//! HTTP request handlers for the Redundancy Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute;
use crate::models::RedundancyResult;
use crate::report::{
    KpiSnapshot, component_rows, export_rows, tax_model_rows, write_csv,
};

use super::request::{CalculationRequest, ResolvedRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, FiscalYearEntry, FiscalYearsResponse,
};
use super::state::AppState;

const EXPORT_FILENAME_HEADER: &str = "attachment; filename=\"uom_redundancy_breakdown.csv\"";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/export", post(export_handler))
        .route("/fiscal-years", get(fiscal_years_handler))
        .route("/agreement", get(agreement_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Returns the full result, the breakdown tables and the headline figures,
/// plus the figures that changed since `previous_kpis` when supplied.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match accept_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let (resolved, result) = match run_calculation(&state, &request, correlation_id) {
        Ok(calculated) => calculated,
        Err(response) => return response,
    };

    let kpis = KpiSnapshot::from_result(&resolved.inputs, &result);
    let kpi_changes = request
        .previous_kpis
        .map(|previous| kpis.changes_since(&previous))
        .unwrap_or_default();

    let response = CalculationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        fiscal_year: resolved.fiscal_year,
        components: component_rows(&resolved.inputs, &result),
        tax_model: tax_model_rows(&resolved.inputs, &result),
        kpis,
        kpi_changes,
        result,
    };

    info!(
        correlation_id = %correlation_id,
        calculation_id = %response.calculation_id,
        fiscal_year = %response.fiscal_year,
        total_gross = %response.result.tax.total_gross.round_dp(2),
        total_net = %response.result.tax.total_net.round_dp(2),
        warnings = response.result.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for POST /export endpoint.
///
/// Accepts the same body as `/calculate` and returns the breakdown as CSV.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match accept_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let (resolved, result) = match run_calculation(&state, &request, correlation_id) {
        Ok(calculated) => calculated,
        Err(response) => return response,
    };

    let rows = export_rows(
        &component_rows(&resolved.inputs, &result),
        &tax_model_rows(&resolved.inputs, &result),
    );

    match write_csv(&rows) {
        Ok(csv) => {
            info!(
                correlation_id = %correlation_id,
                rows = rows.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Export completed successfully"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (header::CONTENT_DISPOSITION, EXPORT_FILENAME_HEADER),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Export failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /fiscal-years endpoint.
async fn fiscal_years_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config();
    let response = FiscalYearsResponse {
        default_fiscal_year: config.default_fiscal_year().to_string(),
        fiscal_years: config
            .fiscal_years()
            .map(|(key, constants)| FiscalYearEntry {
                key: key.to_string(),
                base: constants.base,
                service: constants.service,
            })
            .collect(),
    };

    (StatusCode::OK, Json(response))
}

/// Handler for GET /agreement endpoint.
///
/// Returns the agreement name, description and reference links.
async fn agreement_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.config().agreement().clone()))
}

/// Unwraps the JSON body or builds the 400 response for a rejected one.
fn accept_payload(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<CalculationRequest, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(error_response(ApiErrorResponse::bad_request(error)))
        }
    }
}

/// Resolves defaults against the configuration and runs the engine.
fn run_calculation(
    state: &AppState,
    request: &CalculationRequest,
    correlation_id: Uuid,
) -> Result<(ResolvedRequest, RedundancyResult), Response> {
    let resolved = request.resolve(state.config()).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Request rejected"
        );
        error_response(err.into())
    })?;

    let result = compute(&resolved.inputs);
    Ok((resolved, result))
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
