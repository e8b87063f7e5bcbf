//! Redundancy Payout Engine for the UoM PASO Enterprise Agreement
//!
//! This crate calculates a redundancy payout (redundancy pay, notice, annual
//! and long service leave) from an employee's dates and salary, and produces
//! a simplified tax estimate with a step-by-step audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
