use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_audit_logging(), no_public_access()]
}

fn enable_audit_logging() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-022", "aws", "mq", "enable-audit-logging"),
            Severity::Medium,
            "MQ Broker should have audit logging enabled",
            "Without audit logging it is difficult to trace activity in the MQ broker",
            "Enable audit logging",
        ),
        |state: &State| {
            let mut results = Results::default();
            for broker in &state.aws.mq.brokers {
                if broker.logging.audit.is_false() {
                    results.add("Broker does not have audit logging enabled.", broker.logging.audit.metadata());
                } else {
                    results.add_passed(&broker.metadata);
                }
            }
            results
        },
    )
}

fn no_public_access() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-023", "aws", "mq", "no-public-access"),
            Severity::High,
            "Ensure MQ Broker is not publicly exposed",
            "Publicly accessible MQ Broker may be vulnerable to compromise",
            "Disable public access when not required",
        ),
        |state: &State| {
            let mut results = Results::default();
            for broker in &state.aws.mq.brokers {
                if broker.public_access.is_true() {
                    results.add("Broker has public access enabled.", broker.public_access.metadata());
                } else {
                    results.add_passed(&broker.metadata);
                }
            }
            results
        },
    )
}
