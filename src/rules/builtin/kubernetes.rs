use crate::rules::builtin::metadata;
use crate::rules::cidr::is_public_cidr;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![no_public_ingress(), no_public_egress()]
}

fn no_public_ingress() -> Rule {
    Rule::new(
        metadata(
            ("CS-K8S-001", "kubernetes", "network", "no-public-ingress"),
            Severity::High,
            "Public ingress should not be allowed via network policies",
            "Exposure of infrastructure to the public internet",
            "Remove public access except where explicitly required",
        ),
        |state: &State| {
            let mut results = Results::default();
            for policy in &state.kubernetes.network_policies {
                let mut open = false;
                for cidr in &policy.spec.ingress.source_cidrs {
                    if is_public_cidr(cidr.as_str()) {
                        open = true;
                        results.add("Network policy allows ingress from the public internet.", cidr.metadata());
                    }
                }
                if !open {
                    results.add_passed(&policy.metadata);
                }
            }
            results
        },
    )
}

fn no_public_egress() -> Rule {
    Rule::new(
        metadata(
            ("CS-K8S-002", "kubernetes", "network", "no-public-egress"),
            Severity::High,
            "Public egress should not be allowed via network policies",
            "Exfiltration of data to the public internet",
            "Remove public access except where explicitly required",
        ),
        |state: &State| {
            let mut results = Results::default();
            for policy in &state.kubernetes.network_policies {
                let mut open = false;
                for cidr in &policy.spec.egress.destination_cidrs {
                    if is_public_cidr(cidr.as_str()) {
                        open = true;
                        results.add("Network policy allows egress to the public internet.", cidr.metadata());
                    }
                }
                if !open {
                    results.add_passed(&policy.metadata);
                }
            }
            results
        },
    )
}
