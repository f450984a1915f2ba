use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

const SECURE_TLS_POLICIES: &[&str] = &["Policy-Min-TLS-1-2-2019-07", "Policy-Min-TLS-1-2-PFS-2023-10"];

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_domain_logging(), enforce_https(), use_secure_tls_policy()]
}

fn enable_domain_logging() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-014", "aws", "elasticsearch", "enable-domain-logging"),
            Severity::Medium,
            "Domain logging should be enabled for Elastic Search domains",
            "Logging provides vital information about access and usage",
            "Enable logging for ElasticSearch domains",
        ),
        |state: &State| {
            let mut results = Results::default();
            for domain in &state.aws.elasticsearch.domains {
                let audit = &domain.log_publishing.audit_enabled;
                if audit.is_false() {
                    results.add("Domain audit logging is not enabled.", audit.metadata());
                } else {
                    results.add_passed(&domain.metadata);
                }
            }
            results
        },
    )
}

fn enforce_https() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-015", "aws", "elasticsearch", "enforce-https"),
            Severity::Critical,
            "Elasticsearch doesn't enforce HTTPS traffic.",
            "HTTP traffic can be intercepted and the contents read",
            "Enforce the use of HTTPS for ElasticSearch",
        ),
        |state: &State| {
            let mut results = Results::default();
            for domain in &state.aws.elasticsearch.domains {
                let https = &domain.endpoint.enforce_https;
                if https.is_false() {
                    results.add("Domain does not enforce HTTPS.", https.metadata());
                } else {
                    results.add_passed(&domain.metadata);
                }
            }
            results
        },
    )
}

fn use_secure_tls_policy() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-016", "aws", "elasticsearch", "use-secure-tls-policy"),
            Severity::High,
            "Elasticsearch domain endpoint should use a secure TLS policy",
            "Outdated SSL policies increase exposure to known vulnerabilities",
            "Use the most modern TLS/SSL policies available",
        ),
        |state: &State| {
            let mut results = Results::default();
            for domain in &state.aws.elasticsearch.domains {
                let policy = &domain.endpoint.tls_policy;
                if policy.is_resolvable() && !policy.is_one_of(SECURE_TLS_POLICIES) {
                    results.add("Domain does not have a secure TLS policy.", policy.metadata());
                } else {
                    results.add_passed(&domain.metadata);
                }
            }
            results
        },
    )
}
