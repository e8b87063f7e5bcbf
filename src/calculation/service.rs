//! Length-of-service and age evaluation.
//!
//! Service is counted in whole calendar months: a partial final month does
//! not count, and the count never depends on the number of elapsed days.

use chrono::{Datelike, NaiveDate};

use crate::models::{AuditStep, ServiceDuration};

/// The clause defining the service-based redundancy formula.
pub const SERVICE_CLAUSE: &str = "3.27";

/// Returns the number of completed calendar months from `start` to `end`.
///
/// Returns 0 when `end` is before `start`. A month only counts once the day
/// of month in `end` has reached the day of month in `start`.
///
/// # Examples
///
/// ```
/// use redundancy_engine::calculation::completed_months_between;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2021, 10, 11).unwrap();
/// let end = NaiveDate::from_ymd_opt(2022, 1, 10).unwrap();
/// assert_eq!(completed_months_between(start, end), 2);
/// ```
pub fn completed_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }

    let mut months =
        (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    if end.day() < start.day() {
        months -= 1;
    }

    months.max(0) as u32
}

/// Splits a month count into `(years, months)`.
pub fn split_months(total_months: u32) -> (u32, u32) {
    (total_months / 12, total_months % 12)
}

/// Returns the age in whole years on `on_date`.
///
/// The age only increments once the birthday has been reached in that year.
/// A date of birth after `on_date` gives 0.
///
/// # Examples
///
/// ```
/// use redundancy_engine::calculation::age_on;
/// use chrono::NaiveDate;
///
/// let dob = NaiveDate::from_ymd_opt(1992, 8, 12).unwrap();
/// assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2029, 8, 11).unwrap()), 36);
/// assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2029, 8, 12).unwrap()), 37);
/// ```
pub fn age_on(date_of_birth: NaiveDate, on_date: NaiveDate) -> u32 {
    let mut years = on_date.year() - date_of_birth.year();
    if (on_date.month(), on_date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// The result of evaluating service and age, including the audit step.
#[derive(Debug, Clone)]
pub struct ServiceEvaluation {
    /// Completed service from start date to notice date.
    pub service: ServiceDuration,
    /// Age on the notice date.
    pub age_on_notice: u32,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

/// Evaluates completed service and age on the notice date.
pub fn evaluate_service(
    date_of_birth: NaiveDate,
    start_date: NaiveDate,
    notice_date: NaiveDate,
    step_number: u32,
) -> ServiceEvaluation {
    let service =
        ServiceDuration::from_completed_months(completed_months_between(start_date, notice_date));
    let age_on_notice = age_on(date_of_birth, notice_date);

    let audit_step = AuditStep {
        step_number,
        rule_id: "service_evaluation".to_string(),
        rule_name: "Length of Service and Age".to_string(),
        clause_ref: SERVICE_CLAUSE.to_string(),
        input: serde_json::json!({
            "date_of_birth": date_of_birth.to_string(),
            "start_date": start_date.to_string(),
            "notice_date": notice_date.to_string()
        }),
        output: serde_json::json!({
            "completed_months": service.completed_months,
            "years": service.years,
            "months": service.months,
            "age_on_notice": age_on_notice
        }),
        reasoning: format!(
            "{} years, {} months of completed service to {}; age {} on notice date",
            service.years, service.months, notice_date, age_on_notice
        ),
    };

    ServiceEvaluation {
        service,
        age_on_notice,
        audit_step,
    }
}
