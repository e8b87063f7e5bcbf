//! Redundancy pay entitlement in weeks (clause 3.27).
//!
//! 3 weeks per completed year plus 0.25 weeks per remaining completed month,
//! plus 2 weeks if the employee is 45 or older on the notice date. The
//! 14-week floor and 52-week ceiling only apply once the raw entitlement is
//! positive; an employee with no completed service gets 0 weeks.

use rust_decimal::Decimal;

use crate::models::{AuditStep, RedundancyEntitlement, ServiceDuration};

/// The clause reference for the redundancy pay formula.
pub const REDUNDANCY_PAY_CLAUSE: &str = "3.27";

/// Weeks accrued per completed year of service.
pub const WEEKS_PER_COMPLETED_YEAR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Weeks accrued per remaining completed month of service.
pub const WEEKS_PER_COMPLETED_MONTH: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Age on the notice date at which the bonus weeks apply.
pub const AGE_BOOST_THRESHOLD: u32 = 45;

/// Bonus weeks for employees at or over [`AGE_BOOST_THRESHOLD`].
pub const AGE_BOOST_WEEKS: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Minimum entitlement once any entitlement exists.
pub const MIN_REDUNDANCY_WEEKS: Decimal = Decimal::from_parts(14, 0, 0, false, 0);

/// Maximum entitlement.
pub const MAX_REDUNDANCY_WEEKS: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Applies the redundancy formula to completed service and age.
///
/// # Examples
///
/// ```
/// use redundancy_engine::calculation::redundancy_weeks;
/// use rust_decimal::Decimal;
///
/// // 3 years at age 30: 9 raw weeks, lifted to the 14-week floor
/// assert_eq!(redundancy_weeks(3, 0, 30).weeks, Decimal::from(14));
///
/// // No completed service and no age bonus: the floor does not apply
/// assert_eq!(redundancy_weeks(0, 0, 30).weeks, Decimal::ZERO);
/// ```
pub fn redundancy_weeks(years: u32, months: u32, age_on_notice: u32) -> RedundancyEntitlement {
    let base_weeks = WEEKS_PER_COMPLETED_YEAR * Decimal::from(years)
        + WEEKS_PER_COMPLETED_MONTH * Decimal::from(months);

    let is_age_boost_eligible = age_on_notice >= AGE_BOOST_THRESHOLD;
    let age_bonus_weeks = if is_age_boost_eligible {
        AGE_BOOST_WEEKS
    } else {
        Decimal::ZERO
    };

    let mut weeks = base_weeks + age_bonus_weeks;
    if weeks > Decimal::ZERO {
        weeks = weeks.clamp(MIN_REDUNDANCY_WEEKS, MAX_REDUNDANCY_WEEKS);
    }

    RedundancyEntitlement {
        weeks,
        base_weeks,
        age_bonus_weeks,
        is_age_boost_eligible,
    }
}

/// The redundancy entitlement, including the audit step.
#[derive(Debug, Clone)]
pub struct RedundancyWeeksResult {
    /// The entitlement.
    pub entitlement: RedundancyEntitlement,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the redundancy entitlement for a service duration and age.
pub fn calculate_redundancy_weeks(
    service: &ServiceDuration,
    age_on_notice: u32,
    step_number: u32,
) -> RedundancyWeeksResult {
    let entitlement = redundancy_weeks(service.years, service.months, age_on_notice);
    let raw_weeks = entitlement.base_weeks + entitlement.age_bonus_weeks;
    let clamp_applied = raw_weeks != entitlement.weeks;

    let mut reasoning = format!(
        "3 x {} years + 0.25 x {} months = {} weeks",
        service.years,
        service.months,
        entitlement.base_weeks.normalize()
    );
    if entitlement.is_age_boost_eligible {
        reasoning.push_str(&format!(
            "; age {} meets 45+ rule, +{} weeks",
            age_on_notice,
            AGE_BOOST_WEEKS.normalize()
        ));
    }
    if clamp_applied {
        reasoning.push_str(&format!(
            "; {} weeks clamped to {} (min {}, max {})",
            raw_weeks.normalize(),
            entitlement.weeks.normalize(),
            MIN_REDUNDANCY_WEEKS,
            MAX_REDUNDANCY_WEEKS
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "redundancy_weeks".to_string(),
        rule_name: "Redundancy Pay Weeks".to_string(),
        clause_ref: REDUNDANCY_PAY_CLAUSE.to_string(),
        input: serde_json::json!({
            "years": service.years,
            "months": service.months,
            "age_on_notice": age_on_notice
        }),
        output: serde_json::json!({
            "base_weeks": entitlement.base_weeks.normalize().to_string(),
            "age_bonus_weeks": entitlement.age_bonus_weeks.normalize().to_string(),
            "weeks": entitlement.weeks.normalize().to_string(),
            "is_age_boost_eligible": entitlement.is_age_boost_eligible,
            "clamp_applied": clamp_applied
        }),
        reasoning,
    };

    RedundancyWeeksResult {
        entitlement,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_short_service_lifted_to_floor() {
        let result = redundancy_weeks(3, 0, 30);
        assert_eq!(result.base_weeks, dec("9"));
        assert_eq!(result.weeks, dec("14"));
        assert!(!result.is_age_boost_eligible);
    }

    #[test]
    fn test_nine_years_within_band_unchanged() {
        let result = redundancy_weeks(9, 0, 30);
        assert_eq!(result.weeks, dec("27"));
    }

    #[test]
    fn test_months_accrue_quarter_weeks() {
        let result = redundancy_weeks(8, 3, 37);
        assert_eq!(result.weeks, dec("24.75"));
    }

    #[test]
    fn test_age_45_adds_two_weeks() {
        let result = redundancy_weeks(9, 0, 45);
        assert_eq!(result.weeks, dec("29"));
        assert_eq!(result.age_bonus_weeks, dec("2"));
        assert!(result.is_age_boost_eligible);
    }

    #[test]
    fn test_age_44_gets_no_bonus() {
        let result = redundancy_weeks(9, 0, 44);
        assert_eq!(result.weeks, dec("27"));
        assert_eq!(result.age_bonus_weeks, Decimal::ZERO);
    }

    #[test]
    fn test_zero_service_stays_zero() {
        let result = redundancy_weeks(0, 0, 30);
        assert_eq!(result.weeks, Decimal::ZERO);
    }

    #[test]
    fn test_zero_service_with_age_bonus_is_floored() {
        // 2 bonus weeks make the raw value positive, so the floor applies
        let result = redundancy_weeks(0, 0, 60);
        assert_eq!(result.weeks, dec("14"));
    }

    #[test]
    fn test_one_month_is_floored() {
        let result = redundancy_weeks(0, 1, 25);
        assert_eq!(result.base_weeks, dec("0.25"));
        assert_eq!(result.weeks, dec("14"));
    }

    #[test]
    fn test_long_service_capped_at_52() {
        let result = redundancy_weeks(20, 0, 40);
        assert_eq!(result.base_weeks, dec("60"));
        assert_eq!(result.weeks, dec("52"));
    }

    #[test]
    fn test_audit_step_records_clamp() {
        let service = ServiceDuration::from_completed_months(36);
        let result = calculate_redundancy_weeks(&service, 30, 3);

        assert_eq!(result.audit_step.rule_id, "redundancy_weeks");
        assert_eq!(result.audit_step.clause_ref, "3.27");
        assert_eq!(result.audit_step.output["clamp_applied"], true);
        assert_eq!(result.audit_step.output["weeks"], "14");
        assert!(result.audit_step.reasoning.contains("clamped to 14"));
    }

    #[test]
    fn test_audit_step_records_age_rule() {
        let service = ServiceDuration::from_completed_months(108);
        let result = calculate_redundancy_weeks(&service, 45, 3);

        assert_eq!(result.audit_step.output["is_age_boost_eligible"], true);
        assert_eq!(result.audit_step.output["clamp_applied"], false);
        assert!(result.audit_step.reasoning.contains("45+ rule"));
    }

    proptest! {
        #[test]
        fn prop_weeks_zero_or_within_band(years in 0u32..60, months in 0u32..12, age in 0u32..90) {
            let weeks = redundancy_weeks(years, months, age).weeks;
            prop_assert!(
                weeks == Decimal::ZERO || (weeks >= MIN_REDUNDANCY_WEEKS && weeks <= MAX_REDUNDANCY_WEEKS)
            );
        }
    }
}
