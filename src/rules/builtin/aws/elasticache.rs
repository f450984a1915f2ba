use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_in_transit_encryption(), enable_at_rest_encryption()]
}

fn enable_in_transit_encryption() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-012", "aws", "elasticache", "enable-in-transit-encryption"),
            Severity::High,
            "Elasticache Replication Group uses unencrypted traffic.",
            "In transit data in the Replication Group could be read if intercepted",
            "Enable in transit encryption for replication group",
        ),
        |state: &State| {
            let mut results = Results::default();
            for group in &state.aws.elasticache.replication_groups {
                if group.transit_encryption_enabled.is_false() {
                    results.add(
                        "Replication group does not have transit encryption enabled.",
                        group.transit_encryption_enabled.metadata(),
                    );
                } else {
                    results.add_passed(&group.metadata);
                }
            }
            results
        },
    )
}

fn enable_at_rest_encryption() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-013", "aws", "elasticache", "enable-at-rest-encryption"),
            Severity::High,
            "Elasticache Replication Group stores unencrypted data at-rest.",
            "At-rest data in the Replication Group could be compromised if accessed.",
            "Enable at-rest encryption for replication group",
        ),
        |state: &State| {
            let mut results = Results::default();
            for group in &state.aws.elasticache.replication_groups {
                if group.at_rest_encryption_enabled.is_false() {
                    results.add(
                        "Replication group does not have at-rest encryption enabled.",
                        group.at_rest_encryption_enabled.metadata(),
                    );
                } else {
                    results.add_passed(&group.metadata);
                }
            }
            results
        },
    )
}
