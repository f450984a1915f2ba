use crate::providers::azure::network::SecurityGroupRule;
use crate::rules::builtin::metadata;
use crate::rules::cidr::is_public_cidr;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;
use crate::types::StringValue;

pub(super) fn rules() -> Vec<Rule> {
    vec![no_public_egress(), no_public_ingress()]
}

/// Report every public address of each allow rule in the given direction.
fn check_rules(
    state: &State,
    outbound: bool,
    addresses: fn(&SecurityGroupRule) -> &[StringValue],
    message: &str,
) -> Results {
    let mut results = Results::default();
    for group in &state.azure.network.security_groups {
        for rule in &group.rules {
            if rule.allow.is_false() || *rule.outbound.value() != outbound {
                continue;
            }
            let mut open = false;
            for address in addresses(rule).iter().filter(|a| is_public_cidr(a.as_str())) {
                open = true;
                results.add(message, address.metadata());
            }
            if !open {
                results.add_passed(&rule.metadata);
            }
        }
    }
    results
}

fn no_public_egress() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-006", "azure", "network", "no-public-egress"),
            Severity::Critical,
            "An outbound network security rule allows traffic to /0.",
            "The port is exposed for egress to the internet",
            "Set a more restrictive cidr range",
        ),
        |state: &State| {
            check_rules(
                state,
                true,
                |r| r.destination_addresses.as_slice(),
                "Security group rule allows egress to public internet.",
            )
        },
    )
}

fn no_public_ingress() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-007", "azure", "network", "no-public-ingress"),
            Severity::Critical,
            "An inbound network security rule allows traffic from /0.",
            "The port is exposed for ingress from the internet",
            "Set a more restrictive cidr range",
        ),
        |state: &State| {
            check_rules(
                state,
                false,
                |r| r.source_addresses.as_slice(),
                "Security group rule allows ingress from public internet.",
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::azure::network::SecurityGroup;
    use crate::rules::builtin::testing::failures;
    use crate::types::{BoolValue, Metadata};

    fn s(v: &str) -> StringValue {
        StringValue::new(v.to_string(), Metadata::test())
    }

    fn state(outbound: bool, allow: bool, address: &str) -> State {
        let mut state = State::default();
        state.azure.network.security_groups.push(SecurityGroup {
            metadata: Metadata::test(),
            rules: vec![SecurityGroupRule {
                metadata: Metadata::test(),
                outbound: BoolValue::new(outbound, Metadata::test()),
                allow: BoolValue::new(allow, Metadata::test()),
                source_addresses: vec![s(address)],
                destination_addresses: vec![s(address)],
                ..SecurityGroupRule::default()
            }],
        });
        state
    }

    #[test]
    fn egress() {
        assert_eq!(failures(&no_public_egress(), &state(true, true, "*")).len(), 1);
        assert!(failures(&no_public_egress(), &state(true, true, "10.0.0.0/16")).is_empty());
        assert!(failures(&no_public_egress(), &state(true, false, "*")).is_empty());
        assert!(failures(&no_public_egress(), &state(false, true, "*")).is_empty());
    }

    #[test]
    fn ingress() {
        assert_eq!(failures(&no_public_ingress(), &state(false, true, "0.0.0.0/0")).len(), 1);
        assert!(failures(&no_public_ingress(), &state(true, true, "0.0.0.0/0")).is_empty());
    }
}
