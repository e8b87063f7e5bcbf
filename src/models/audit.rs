//! Audit trace models.
//!
//! Every calculation stage records what it was given, what it produced and
//! why, so a payout estimate can be explained line by line.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the agreement clause (or `tax_estimate`) for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// How serious an [`AuditWarning`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; the estimate is still meaningful.
    Low,
    /// The estimate was computed but is likely not what the caller intended.
    Medium,
}

/// A warning generated during calculation.
///
/// Warnings flag degraded inputs that the engine absorbed instead of
/// rejecting. They never change a computed figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use redundancy_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns the first step recorded for a rule, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|step| step.rule_id == rule_id)
    }

    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_sample_step(step_number: u32, rule_id: &str) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: "Sample".to_string(),
            clause_ref: "3.27".to_string(),
            input: serde_json::json!({"years": 3}),
            output: serde_json::json!({"weeks": "14"}),
            reasoning: "sample".to_string(),
        }
    }

    #[test]
    fn test_step_lookup_by_rule_id() {
        let trace = AuditTrace {
            steps: vec![
                create_sample_step(1, "service_evaluation"),
                create_sample_step(2, "redundancy_weeks"),
            ],
            warnings: vec![],
        };

        assert_eq!(trace.step("redundancy_weeks").unwrap().step_number, 2);
        assert!(trace.step("etp_tax").is_none());
    }

    #[test]
    fn test_has_warning() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning {
                code: "NOTICE_BEFORE_START".to_string(),
                message: "notice precedes start".to_string(),
                severity: WarningSeverity::Medium,
            }],
        };

        assert!(trace.has_warning("NOTICE_BEFORE_START"));
        assert!(!trace.has_warning("START_BEFORE_BIRTH"));
    }

    #[test]
    fn test_warning_severity_serialization() {
        assert_eq!(
            serde_json::to_string(&WarningSeverity::Low).unwrap(),
            "\"low\""
        );
        assert_eq!(
            serde_json::to_string(&WarningSeverity::Medium).unwrap(),
            "\"medium\""
        );
    }

    #[test]
    fn test_audit_step_serializes_json_payloads() {
        let step = create_sample_step(1, "redundancy_weeks");
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["rule_id"], "redundancy_weeks");
        assert_eq!(json["input"]["years"], 3);
        assert_eq!(json["output"]["weeks"], "14");
    }
}
