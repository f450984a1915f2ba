//! cloud-shield: security scanner for infrastructure-as-code.
//!
//! Terraform, CloudFormation and Kubernetes sources are adapted into one
//! typed [`state::State`] per source group, namespaced by provider and then
//! by service. Every value in the state carries the source range it came
//! from, so rule results point back at the line that caused them.
//!
//! # Quick Start
//!
//! ```no_run
//! use cloudshield::adapter::Sources;
//! use cloudshield::parser::terraform::Modules;
//! use cloudshield::{scan, ScanOptions};
//!
//! let json = std::fs::read_to_string("plan.json").unwrap();
//! let sources = Sources {
//!     terraform: vec![Modules::from_json(&json).unwrap()],
//!     ..Sources::default()
//! };
//! let report = scan(&sources, &ScanOptions::default()).unwrap();
//! println!("Pass: {}, Failures: {}", report.verdict.pass, report.failures().count());
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod providers;
pub mod rules;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adapter::{SourceKind, Sources};
use config::Config;
use error::Result;
use rules::policy::PolicyVerdict;
use rules::{RuleEngine, ScanResult, Severity};

/// Options for a scan invocation.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Path to a `.cloudshield.toml`. Built-in defaults apply when unset.
    pub config_path: Option<PathBuf>,
    /// Override for the `fail_on` threshold.
    pub fail_on_override: Option<Severity>,
    /// Override for `engine.parallel`.
    pub parallel: Option<bool>,
    /// Install the global tracing subscriber from the `[logging]` section.
    pub init_logging: bool,
}

/// Results for one adapted source group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: SourceKind,
    pub name: String,
    pub results: Vec<ScanResult>,
}

/// Complete scan report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
    pub verdict: PolicyVerdict,
}

impl ScanReport {
    pub fn results(&self) -> impl Iterator<Item = &ScanResult> {
        self.sources.iter().flat_map(|s| s.results.iter())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScanResult> {
        self.results().filter(|r| r.is_failed())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run a complete scan: load config, adapt every source group, evaluate
/// the rule catalog against each state and apply the result policy.
pub fn scan(sources: &Sources, options: &ScanOptions) -> Result<ScanReport> {
    let mut config = match &options.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if options.init_logging {
        logging::init(&config.logging);
    }
    if let Some(fail_on) = options.fail_on_override {
        config.policy.fail_on = fail_on;
    }
    let parallel = options.parallel.unwrap_or(config.engine.parallel);

    let scan_id = Uuid::new_v4();
    let span = tracing::info_span!("scan", %scan_id);
    let _guard = span.enter();
    let started_at = Utc::now();

    if sources.is_empty() {
        tracing::warn!("no sources to scan");
    }

    let engine = RuleEngine::new().with_parallel(parallel);
    let mut reports = Vec::new();
    let mut all_results = Vec::new();
    for adapted in adapter::adapt_all(sources, parallel) {
        let results = engine.evaluate(&adapted.state);
        all_results.extend(results.iter().cloned());
        reports.push(SourceReport {
            source: adapted.source,
            name: adapted.name,
            results: config.policy.apply(&results),
        });
    }

    let verdict = config.policy.evaluate(&all_results);
    tracing::info!(
        sources = reports.len(),
        failures = verdict.effective_failures,
        pass = verdict.pass,
        "scan complete"
    );

    Ok(ScanReport {
        scan_id,
        started_at,
        sources: reports,
        verdict,
    })
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::parser::cloudformation::{FileContext, Resource};
    use crate::parser::node::Node;
    use crate::parser::terraform::{Block, Modules};
    use crate::parser::Value;
    use crate::rules::Status;
    use proptest::prelude::*;
    use std::io::Write;

    fn eks(cidrs: &[&str]) -> Sources {
        Sources {
            terraform: vec![Modules::from_blocks(vec![Block::resource(
                "aws_eks_cluster",
                "main",
            )
            .lines(1, 10)
            .with_block(
                Block::nested("vpc_config")
                    .lines(3, 6)
                    .with_attribute("endpoint_public_access", true, 4)
                    .with_attribute("public_access_cidrs", Value::strings(cidrs.iter().copied()), 5),
            )])],
            ..Sources::default()
        }
    }

    fn status_of<'a>(report: &'a ScanReport, long_id: &str) -> Vec<&'a ScanResult> {
        report.results().filter(|r| r.long_id == long_id).collect()
    }

    #[test]
    fn public_eks_cidr_fails_at_its_line() {
        let report = scan(&eks(&["0.0.0.0/0"]), &ScanOptions::default()).unwrap();
        let found = status_of(&report, "aws-eks-no-public-cluster-access-to-cidr");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, Status::Failed);
        assert_eq!(found[0].metadata.range().start_line(), 5);
        assert!(!report.verdict.pass);
    }

    #[test]
    fn private_eks_cidr_passes() {
        let report = scan(&eks(&["10.0.0.0/16"]), &ScanOptions::default()).unwrap();
        let found = status_of(&report, "aws-eks-no-public-cluster-access-to-cidr");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, Status::Passed);
    }

    fn trail_with_filter(pattern: &str) -> Sources {
        Sources {
            terraform: vec![Modules::from_blocks(vec![
                Block::resource("aws_cloudtrail", "main")
                    .lines(1, 6)
                    .with_attribute("is_multi_region_trail", true, 2)
                    .with_attribute(
                        "cloud_watch_logs_group_arn",
                        Value::reference("aws_cloudwatch_log_group.trail.arn"),
                        3,
                    ),
                Block::resource("aws_cloudwatch_log_group", "trail")
                    .lines(8, 10)
                    .with_attribute("name", "trail", 9),
                Block::resource("aws_cloudwatch_log_metric_filter", "no_mfa")
                    .lines(12, 16)
                    .with_attribute("name", "NoMFA", 13)
                    .with_attribute("pattern", pattern, 14)
                    .with_attribute(
                        "log_group_name",
                        Value::reference("aws_cloudwatch_log_group.trail.name"),
                        15,
                    ),
                Block::resource("aws_cloudwatch_metric_alarm", "no_mfa")
                    .lines(18, 20)
                    .with_attribute("metric_name", "NoMFA", 19),
            ])],
            ..Sources::default()
        }
    }

    #[test]
    fn non_mfa_alarm() {
        let options = ScanOptions::default();
        let pattern = r#"{ ($.eventName = "ConsoleLogin") && ($.additionalEventData.MFAUsed != "Yes") }"#;
        let report = scan(&trail_with_filter(pattern), &options).unwrap();
        let found = status_of(&report, "aws-cloudwatch-require-non-mfa-login-alarm");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, Status::Passed);

        let report = scan(&trail_with_filter("{ $.eventName = \"ConsoleLogin\" }"), &options).unwrap();
        let found = status_of(&report, "aws-cloudwatch-require-non-mfa-login-alarm");
        assert_eq!(found[0].status, Status::Failed);
        assert_eq!(found[0].metadata.range().start_line(), 1);
    }

    #[test]
    fn one_report_per_source_group() {
        let mut sources = eks(&["0.0.0.0/0"]);
        sources.cloudformation.push(FileContext::new(
            "stack.yaml",
            vec![Resource::new("Broker", "AWS::AmazonMQ::Broker", 2, 6).with_properties(
                Node::map(
                    "Properties",
                    3,
                    6,
                    vec![Node::scalar("PubliclyAccessible", "true", 4)],
                ),
            )],
        ));
        let report = scan(&sources, &ScanOptions::default()).unwrap();
        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.sources[1].source, SourceKind::CloudFormation);
        let public = status_of(&report, "aws-mq-no-public-access");
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].metadata.range().local_filename(), "stack.yaml");
        assert_eq!(public[0].metadata.range().start_line(), 4);
    }

    #[test]
    fn config_file_drives_the_verdict() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[policy]\nignore_rules = [\"aws-eks-no-public-cluster-access-to-cidr\", \"aws-eks-no-public-cluster-access\", \"CS-AWS-009\"]\n[engine]\nparallel = false\n"
        )
        .unwrap();
        let options = ScanOptions {
            config_path: Some(file.path().to_path_buf()),
            fail_on_override: Some(Severity::Critical),
            ..ScanOptions::default()
        };
        let report = scan(&eks(&["0.0.0.0/0"]), &options).unwrap();
        assert!(report.failures().all(|r| !r.long_id.starts_with("aws-eks-")));
        assert_eq!(report.verdict.fail_threshold, Severity::Critical);
    }

    #[test]
    fn report_serializes() {
        let report = scan(&eks(&["0.0.0.0/0"]), &ScanOptions::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["sources"][0]["source"], "terraform");
        assert_eq!(json["verdict"]["pass"], false);
    }

    #[test]
    fn empty_sources_pass() {
        let report = scan(&Sources::default(), &ScanOptions::default()).unwrap();
        assert!(report.sources.is_empty());
        assert!(report.verdict.pass);
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = ScanOptions {
            config_path: Some(dir.path().join(config::CONFIG_FILE)),
            ..ScanOptions::default()
        };
        assert!(scan(&Sources::default(), &options).is_ok());
    }

    proptest! {
        #[test]
        fn adaptation_is_deterministic(cidrs in proptest::collection::vec("[0-9]{1,3}\\.[0-9]{1,3}\\.0\\.0/[0-9]{1,2}", 0..4)) {
            let cidrs: Vec<&str> = cidrs.iter().map(String::as_str).collect();
            let sources = eks(&cidrs);
            let first = adapter::adapt_all(&sources, true);
            let second = adapter::adapt_all(&sources, false);
            prop_assert_eq!(&first[0].state, &second[0].state);
        }
    }
}
