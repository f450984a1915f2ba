//! Rules and the engine that evaluates them against a [`State`].
//!
//! A rule is plain data: its metadata plus a function from the state to
//! [`Results`]. The catalog is an explicit list handed to the engine, so a
//! caller can evaluate any subset.

pub mod builtin;
pub mod cidr;
pub mod policy;
mod severity;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::state::State;
use crate::types::Metadata;

pub use severity::Severity;

/// Evaluation function of a rule.
pub type EvaluateFn = fn(&State) -> Results;

/// Identity and documentation of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Stable identifier (e.g., "CS-AWS-001").
    pub id: String,
    pub provider: String,
    pub service: String,
    pub short_code: String,
    pub summary: String,
    pub impact: String,
    pub resolution: String,
    pub severity: Severity,
}

impl RuleMetadata {
    /// `provider-service-short_code`, the human-readable identifier.
    pub fn long_id(&self) -> String {
        format!("{}-{}-{}", self.provider, self.service, self.short_code)
    }
}

#[derive(Clone)]
pub struct Rule {
    pub metadata: RuleMetadata,
    evaluate: EvaluateFn,
}

impl Rule {
    pub fn new(metadata: RuleMetadata, evaluate: EvaluateFn) -> Self {
        Self { metadata, evaluate }
    }

    /// Run the rule and stamp every outcome with its identity.
    pub fn evaluate(&self, state: &State) -> Vec<ScanResult> {
        let long_id = self.metadata.long_id();
        (self.evaluate)(state)
            .outcomes
            .into_iter()
            .map(|o| ScanResult {
                rule_id: self.metadata.id.clone(),
                long_id: long_id.clone(),
                severity: self.metadata.severity,
                status: o.status,
                description: o.description,
                metadata: o.metadata,
            })
            .collect()
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.metadata.id)
            .field("long_id", &self.metadata.long_id())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq)]
struct Outcome {
    status: Status,
    description: String,
    metadata: Metadata,
}

/// What a rule function reports, before the engine attaches rule identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Results {
    outcomes: Vec<Outcome>,
}

impl Results {
    /// Record a failure at `metadata`.
    pub fn add(&mut self, description: impl Into<String>, metadata: &Metadata) {
        self.push(Status::Failed, description.into(), metadata);
    }

    pub fn add_passed(&mut self, metadata: &Metadata) {
        self.push(Status::Passed, String::new(), metadata);
    }

    pub fn add_not_applicable(&mut self, metadata: &Metadata) {
        self.push(Status::NotApplicable, String::new(), metadata);
    }

    fn push(&mut self, status: Status, description: String, metadata: &Metadata) {
        self.outcomes.push(Outcome {
            status,
            description,
            metadata: metadata.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// One rule's determination for one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub rule_id: String,
    pub long_id: String,
    pub severity: Severity,
    pub status: Status,
    pub description: String,
    pub metadata: Metadata,
}

impl ScanResult {
    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }

    /// Whether the deciding value was filled in by an adapter default
    /// rather than written in source.
    pub fn is_defaulted(&self) -> bool {
        self.metadata.is_default()
    }
}

/// Runs a rule catalog against a state.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<Rule>,
    parallel: bool,
}

impl RuleEngine {
    /// Create an engine with the full builtin catalog.
    pub fn new() -> Self {
        Self {
            rules: builtin::all_rules(),
            parallel: true,
        }
    }

    /// Create an engine over an explicit rule list. IDs must be unique.
    pub fn with_rules(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.metadata.id.as_str()) {
                return Err(ScanError::Rule {
                    rule_id: rule.metadata.id.clone(),
                    message: "duplicate rule id".into(),
                });
            }
        }
        Ok(Self {
            rules,
            parallel: true,
        })
    }

    /// Toggle rayon evaluation. Has no effect without the `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Evaluate every rule. Results come back in catalog order.
    pub fn evaluate(&self, state: &State) -> Vec<ScanResult> {
        let results: Vec<ScanResult> = self.run_rules(state).into_iter().flatten().collect();
        tracing::debug!(
            rules = self.rules.len(),
            results = results.len(),
            failed = results.iter().filter(|r| r.is_failed()).count(),
            "rules evaluated"
        );
        results
    }

    #[cfg(feature = "parallel")]
    fn run_rules(&self, state: &State) -> Vec<Vec<ScanResult>> {
        use rayon::prelude::*;

        if self.parallel {
            self.rules.par_iter().map(|r| r.evaluate(state)).collect()
        } else {
            self.rules.iter().map(|r| r.evaluate(state)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_rules(&self, state: &State) -> Vec<Vec<ScanResult>> {
        self.rules.iter().map(|r| r.evaluate(state)).collect()
    }

    /// List metadata for all registered rules.
    pub fn list_rules(&self) -> Vec<RuleMetadata> {
        self.rules.iter().map(|r| r.metadata.clone()).collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoolValue;

    fn metadata(id: &str, short_code: &str) -> RuleMetadata {
        RuleMetadata {
            id: id.into(),
            provider: "aws".into(),
            service: "test".into(),
            short_code: short_code.into(),
            summary: "test rule".into(),
            impact: String::new(),
            resolution: String::new(),
            severity: Severity::High,
        }
    }

    fn always_fails(_: &State) -> Results {
        let mut results = Results::default();
        results.add("bad", &Metadata::test());
        results
    }

    fn defaulted_pass(_: &State) -> Results {
        let mut results = Results::default();
        results.add_passed(BoolValue::defaulted(true, Metadata::test()).metadata());
        results
    }

    #[test]
    fn long_id_joins_provider_service_and_code() {
        assert_eq!(metadata("X-1", "do-thing").long_id(), "aws-test-do-thing");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = RuleEngine::with_rules(vec![
            Rule::new(metadata("X-1", "a"), always_fails),
            Rule::new(metadata("X-1", "b"), always_fails),
        ])
        .unwrap_err();
        assert!(matches!(err, ScanError::Rule { ref rule_id, .. } if rule_id == "X-1"));
    }

    #[test]
    fn results_are_stamped_and_ordered() {
        let engine = RuleEngine::with_rules(vec![
            Rule::new(metadata("X-1", "a"), always_fails),
            Rule::new(metadata("X-2", "b"), defaulted_pass),
            Rule::new(metadata("X-3", "c"), always_fails),
        ])
        .unwrap();
        for parallel in [true, false] {
            let results = engine.clone().with_parallel(parallel).evaluate(&State::default());
            let ids: Vec<&str> = results.iter().map(|r| r.rule_id.as_str()).collect();
            assert_eq!(ids, ["X-1", "X-2", "X-3"]);
            assert_eq!(results[0].long_id, "aws-test-a");
            assert_eq!(results[0].status, Status::Failed);
            assert_eq!(results[0].severity, Severity::High);
            assert!(!results[0].is_defaulted());
            assert_eq!(results[1].status, Status::Passed);
            assert!(results[1].is_defaulted());
        }
    }

    #[test]
    fn builtin_catalog_has_unique_ids() {
        let rules = builtin::all_rules();
        let long_ids: HashSet<String> = rules.iter().map(|r| r.metadata.long_id()).collect();
        assert_eq!(long_ids.len(), rules.len());
        assert!(RuleEngine::with_rules(rules).is_ok());
    }

    #[test]
    fn builtin_rules_are_vacuous_on_empty_state() {
        let results = RuleEngine::new().evaluate(&State::default());
        let failed: Vec<&ScanResult> = results.iter().filter(|r| r.is_failed()).collect();
        assert!(failed.is_empty(), "unexpected failures: {failed:#?}");
    }
}
