//! HTTP API module for the Redundancy Engine.
//!
//! This module provides the REST API endpoints for calculating and exporting
//! a redundancy payout under the PASO Enterprise Agreement.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, CashComponentsRequest, EmployeeRequest, ResolvedRequest, TaxRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, FiscalYearEntry, FiscalYearsResponse,
};
pub use state::AppState;
