//! Headline figures and change detection between runs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::WORKING_DAYS_PER_WEEK;
use crate::models::{RedundancyInputs, RedundancyResult};

use super::format::round_to;

/// Headline figures for one calculation, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// Weekly pay.
    pub weekly_pay: Decimal,
    /// Redundancy entitlement in weeks.
    pub redundancy_weeks: Decimal,
    /// Unused annual leave expressed in weeks.
    pub unused_annual_leave_weeks: Decimal,
    /// Unused long service leave in weeks.
    pub unused_long_service_leave_weeks: Decimal,
    /// Total gross payout.
    pub gross_total: Decimal,
    /// Estimated net payout.
    pub net_total: Decimal,
}

/// A headline figure that differs from the previous snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiChange {
    /// Field name in the snapshot.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Previous value.
    pub previous: Decimal,
    /// Current value.
    pub current: Decimal,
}

impl KpiSnapshot {
    /// Takes the headline figures from a calculation.
    pub fn from_result(inputs: &RedundancyInputs, result: &RedundancyResult) -> Self {
        Self {
            weekly_pay: round_to(result.weekly_pay, 2),
            redundancy_weeks: round_to(result.redundancy.weeks, 2),
            unused_annual_leave_weeks: round_to(
                inputs.unused_annual_leave_days / WORKING_DAYS_PER_WEEK,
                2,
            ),
            unused_long_service_leave_weeks: round_to(inputs.unused_long_service_leave_weeks, 2),
            gross_total: round_to(result.tax.total_gross, 2),
            net_total: round_to(result.tax.total_net, 2),
        }
    }

    /// Lists the figures that changed since `previous`, in display order.
    pub fn changes_since(&self, previous: &KpiSnapshot) -> Vec<KpiChange> {
        self.entries()
            .into_iter()
            .zip(previous.entries())
            .filter(|((_, _, current), (_, _, before))| current != before)
            .map(|((key, label, current), (_, _, before))| KpiChange {
                key: key.to_string(),
                label: label.to_string(),
                previous: before,
                current,
            })
            .collect()
    }

    fn entries(&self) -> [(&'static str, &'static str, Decimal); 6] {
        [
            ("weekly_pay", "Weekly pay", self.weekly_pay),
            ("redundancy_weeks", "Redundancy weeks", self.redundancy_weeks),
            (
                "unused_annual_leave_weeks",
                "Unused AL (weeks)",
                self.unused_annual_leave_weeks,
            ),
            (
                "unused_long_service_leave_weeks",
                "Unused LSL (weeks)",
                self.unused_long_service_leave_weeks,
            ),
            ("gross_total", "Gross total", self.gross_total),
            ("net_total", "Estimated net", self.net_total),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute;
    use crate::models::TaxSettings;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_inputs() -> RedundancyInputs {
        RedundancyInputs {
            annual_salary: dec("158000"),
            date_of_birth: NaiveDate::from_ymd_opt(1992, 8, 12).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2021, 10, 11).unwrap(),
            notice_date: NaiveDate::from_ymd_opt(2029, 10, 11).unwrap(),
            notice_weeks: dec("8"),
            notice_paid_in_lieu: true,
            unused_annual_leave_days: dec("5"),
            unused_long_service_leave_weeks: dec("4"),
            include_annual_leave_loading: false,
            annual_leave_loading_pct: dec("0.175"),
            tax: TaxSettings {
                cap_base_amount: dec("13100"),
                cap_per_service_year_amount: dec("6552"),
                is_under_preservation_age: true,
                etp_tax_rate_under: dec("0.32"),
                etp_tax_rate_over: dec("0.17"),
                leave_withholding_rate: dec("0.32"),
            },
        }
    }

    fn snapshot_of(inputs: &RedundancyInputs) -> KpiSnapshot {
        KpiSnapshot::from_result(inputs, &compute(inputs))
    }

    #[test]
    fn test_snapshot_values() {
        let snapshot = snapshot_of(&create_test_inputs());

        assert_eq!(snapshot.weekly_pay, dec("3038.46"));
        assert_eq!(snapshot.redundancy_weeks, dec("24"));
        assert_eq!(snapshot.unused_annual_leave_weeks, dec("1"));
        assert_eq!(snapshot.unused_long_service_leave_weeks, dec("4"));
        assert_eq!(snapshot.gross_total, dec("112423.08"));
        assert_eq!(snapshot.net_total, dec("97412.81"));
    }

    #[test]
    fn test_identical_snapshots_have_no_changes() {
        let snapshot = snapshot_of(&create_test_inputs());
        assert!(snapshot.changes_since(&snapshot).is_empty());
    }

    #[test]
    fn test_leave_change_is_reported() {
        let before = snapshot_of(&create_test_inputs());
        let mut inputs = create_test_inputs();
        inputs.unused_annual_leave_days = dec("10");
        let after = snapshot_of(&inputs);

        let keys: Vec<String> = after
            .changes_since(&before)
            .into_iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec!["unused_annual_leave_weeks", "gross_total", "net_total"]);
    }

    #[test]
    fn test_change_carries_both_values() {
        let before = snapshot_of(&create_test_inputs());
        let mut inputs = create_test_inputs();
        inputs.annual_salary = dec("104000");
        let after = snapshot_of(&inputs);

        let changes = after.changes_since(&before);
        let weekly = changes.iter().find(|c| c.key == "weekly_pay").unwrap();
        assert_eq!(weekly.label, "Weekly pay");
        assert_eq!(weekly.previous, dec("3038.46"));
        assert_eq!(weekly.current, dec("2000"));
        assert!(!changes.iter().any(|c| c.key == "redundancy_weeks"));
    }
}
