//! Core data models for the Redundancy Engine.
//!
//! This module contains the input record, the derived facts and totals, and
//! the audit trace types used throughout the engine.

mod audit;
mod inputs;
mod redundancy_result;

pub use audit::{AuditStep, AuditTrace, AuditWarning, WarningSeverity};
pub use inputs::{
    MAX_ANNUAL_LEAVE_DAYS, MAX_ANNUAL_SALARY, MAX_CAP_AMOUNT, MAX_LEAVE_WEEKS, NoticeTreatment,
    RedundancyInputs, TaxSettings,
};
pub use redundancy_result::{
    CashComponents, EtpAssessment, RedundancyEntitlement, RedundancyResult, ServiceDuration,
    TaxEstimate,
};
