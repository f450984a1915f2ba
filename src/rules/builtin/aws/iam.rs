use chrono::Utc;

use crate::providers::aws::iam::Policy;
use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

const MIN_PASSWORD_LENGTH: i64 = 14;

pub(super) fn rules() -> Vec<Rule> {
    vec![no_policy_wildcards(), set_minimum_password_length(), remove_expired_certificates()]
}

fn is_wildcard_action(action: &str) -> bool {
    action == "*" || action.ends_with(":*")
}

fn check_policy(policy: &Policy, results: &mut Results) {
    if policy.builtin.is_true() {
        return;
    }
    let document = &policy.document;
    let mut clean = true;
    for statement in document.parsed.statements.iter().filter(|s| s.is_allow()) {
        let at = document.metadata_from_ranges(&[statement.range]);
        if let Some(action) = statement.actions.iter().find(|a| is_wildcard_action(a)) {
            clean = false;
            results.add(format!("IAM policy document uses wildcarded action '{action}'"), &at);
        }
        if statement.resources.iter().any(|r| r == "*") {
            clean = false;
            results.add("IAM policy document uses wildcarded resource '*'", &at);
        }
    }
    if clean {
        results.add_passed(&document.metadata);
    }
}

fn no_policy_wildcards() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-017", "aws", "iam", "no-policy-wildcards"),
            Severity::High,
            "IAM policy should avoid use of wildcards and instead apply the principle of least privilege",
            "Overly permissive policies may grant access to sensitive resources",
            "Specify the exact permissions required, and to which resources they should apply instead of using wildcards.",
        ),
        |state: &State| {
            let mut results = Results::default();
            let iam = &state.aws.iam;
            let policies = iam
                .policies
                .iter()
                .chain(iam.groups.iter().flat_map(|g| &g.policies))
                .chain(iam.users.iter().flat_map(|u| &u.policies))
                .chain(iam.roles.iter().flat_map(|r| &r.policies));
            for policy in policies {
                check_policy(policy, &mut results);
            }
            results
        },
    )
}

fn set_minimum_password_length() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-018", "aws", "iam", "set-minimum-password-length"),
            Severity::Medium,
            "IAM Password policy should have minimum password length of 14 or more characters.",
            "Short, simple passwords are easier to compromise",
            "Enforce longer, more complex passwords in the policy",
        ),
        |state: &State| {
            let mut results = Results::default();
            let policy = &state.aws.iam.password_policy;
            if policy.metadata.is_unmanaged() {
                return results;
            }
            if policy.minimum_length.less_than(MIN_PASSWORD_LENGTH) {
                results.add(
                    "Password policy has a minimum password length of less than 14 characters.",
                    policy.minimum_length.metadata(),
                );
            } else {
                results.add_passed(&policy.metadata);
            }
            results
        },
    )
}

fn remove_expired_certificates() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-019", "aws", "iam", "remove-expired-certificates"),
            Severity::Low,
            "Delete expired TLS certificates",
            "Risk of misconfiguration and damage to credibility",
            "Remove expired certificates",
        ),
        |state: &State| {
            let mut results = Results::default();
            let now = Utc::now();
            for certificate in &state.aws.iam.server_certificates {
                if certificate.expiration.before(now) {
                    results.add("Certificate has expired.", certificate.expiration.metadata());
                } else {
                    results.add_passed(&certificate.metadata);
                }
            }
            results
        },
    )
}
