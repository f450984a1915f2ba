use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{ScanResult, Severity};

/// Policy verdict: the final pass/fail decision after applying the ignore
/// list and severity overrides to failed results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub total_failures: usize,
    pub effective_failures: usize,
    pub highest_severity: Option<Severity>,
    pub fail_threshold: Severity,
}

/// Policy configuration loaded from `.cloudshield.toml`.
///
/// Rules are named either by ID or by long ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Minimum severity to fail the scan.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
    /// Rules to ignore entirely.
    #[serde(default)]
    pub ignore_rules: HashSet<String>,
    /// Per-rule severity overrides.
    #[serde(default)]
    pub overrides: HashMap<String, Severity>,
}

fn default_fail_on() -> Severity {
    Severity::High
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on: Severity::High,
            ignore_rules: HashSet::new(),
            overrides: HashMap::new(),
        }
    }
}

impl Policy {
    fn is_ignored(&self, result: &ScanResult) -> bool {
        self.ignore_rules.contains(&result.rule_id) || self.ignore_rules.contains(&result.long_id)
    }

    fn severity_of(&self, result: &ScanResult) -> Severity {
        self.overrides
            .get(&result.rule_id)
            .or_else(|| self.overrides.get(&result.long_id))
            .copied()
            .unwrap_or(result.severity)
    }

    /// Evaluate results against this policy. Only failures count.
    pub fn evaluate(&self, results: &[ScanResult]) -> PolicyVerdict {
        let failures: Vec<&ScanResult> = results.iter().filter(|r| r.is_failed()).collect();
        let effective: Vec<Severity> = failures
            .iter()
            .filter(|r| !self.is_ignored(r))
            .map(|r| self.severity_of(r))
            .collect();

        let highest = effective.iter().copied().max();
        let failed = effective.iter().any(|&sev| sev >= self.fail_on);

        PolicyVerdict {
            pass: !failed,
            total_failures: failures.len(),
            effective_failures: effective.len(),
            highest_severity: highest,
            fail_threshold: self.fail_on,
        }
    }

    /// Filter results: remove ignored rules, apply overrides.
    pub fn apply(&self, results: &[ScanResult]) -> Vec<ScanResult> {
        results
            .iter()
            .filter(|r| !self.is_ignored(r))
            .map(|r| {
                let mut r = r.clone();
                r.severity = self.severity_of(&r);
                r
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Status;
    use crate::types::Metadata;

    fn result(rule_id: &str, severity: Severity, status: Status) -> ScanResult {
        ScanResult {
            rule_id: rule_id.into(),
            long_id: format!("aws-s3-{}", rule_id.to_lowercase()),
            severity,
            status,
            description: "test".into(),
            metadata: Metadata::test(),
        }
    }

    #[test]
    fn default_policy_fails_on_high() {
        let verdict = Policy::default().evaluate(&[result("CS-1", Severity::High, Status::Failed)]);
        assert!(!verdict.pass);
        assert_eq!(verdict.highest_severity, Some(Severity::High));
    }

    #[test]
    fn default_policy_passes_on_medium() {
        let verdict = Policy::default().evaluate(&[result("CS-9", Severity::Medium, Status::Failed)]);
        assert!(verdict.pass);
    }

    #[test]
    fn passed_results_do_not_count() {
        let verdict = Policy::default().evaluate(&[
            result("CS-1", Severity::Critical, Status::Passed),
            result("CS-2", Severity::Critical, Status::NotApplicable),
        ]);
        assert!(verdict.pass);
        assert_eq!(verdict.total_failures, 0);
        assert_eq!(verdict.highest_severity, None);
    }

    #[test]
    fn ignore_by_id_or_long_id() {
        let mut policy = Policy::default();
        policy.ignore_rules.insert("CS-1".into());
        policy.ignore_rules.insert("aws-s3-cs-2".into());
        let results = [
            result("CS-1", Severity::Critical, Status::Failed),
            result("CS-2", Severity::Critical, Status::Failed),
        ];
        let verdict = policy.evaluate(&results);
        assert!(verdict.pass);
        assert_eq!(verdict.total_failures, 2);
        assert_eq!(verdict.effective_failures, 0);
        assert!(policy.apply(&results).is_empty());
    }

    #[test]
    fn override_downgrades_severity() {
        let mut policy = Policy::default();
        policy.overrides.insert("CS-1".into(), Severity::Info);
        let results = [result("CS-1", Severity::Critical, Status::Failed)];
        assert!(policy.evaluate(&results).pass);
        assert_eq!(policy.apply(&results)[0].severity, Severity::Info);
    }
}
