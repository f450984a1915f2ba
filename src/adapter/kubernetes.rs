//! Kubernetes manifests. Only network policies are adapted.

use crate::parser::kubernetes::Manifest;
use crate::parser::node::Node;
use crate::parser::{AttributeExt, ConfigBlock};
use crate::providers::kubernetes::{Egress, Ingress, Kubernetes, NetworkPolicy, NetworkPolicySpec, Port};
use crate::state::State;
use crate::types::{Metadata, StringValue};

const NETWORK_POLICY_API: &str = "networking.k8s.io/v1";

pub fn adapt(manifests: &[Manifest]) -> State {
    State {
        kubernetes: Kubernetes {
            network_policies: manifests
                .iter()
                .filter(|m| m.kind() == Some("NetworkPolicy"))
                .filter(|m| {
                    let supported = m.api_version() == Some(NETWORK_POLICY_API);
                    if !supported {
                        tracing::debug!(
                            path = %m.path,
                            api_version = m.api_version().unwrap_or(""),
                            "skipping network policy with unsupported apiVersion"
                        );
                    }
                    supported
                })
                .map(adapt_network_policy)
                .collect(),
        },
        ..State::default()
    }
}

fn adapt_network_policy(manifest: &Manifest) -> NetworkPolicy {
    let spec = match manifest.get("spec") {
        Some(spec) => {
            let (ingress_meta, source_cidrs, ingress_ports) =
                collect_rules(spec, "ingress", "from");
            let (egress_meta, destination_cidrs, egress_ports) =
                collect_rules(spec, "egress", "to");
            NetworkPolicySpec {
                metadata: spec.metadata(),
                ingress: Ingress {
                    metadata: ingress_meta,
                    ports: ingress_ports,
                    source_cidrs,
                },
                egress: Egress {
                    metadata: egress_meta,
                    ports: egress_ports,
                    destination_cidrs,
                },
            }
        }
        None => NetworkPolicySpec {
            metadata: manifest.metadata(),
            ingress: Ingress {
                metadata: manifest.metadata(),
                ..Ingress::default()
            },
            egress: Egress {
                metadata: manifest.metadata(),
                ..Egress::default()
            },
        },
    };
    NetworkPolicy {
        metadata: manifest.metadata(),
        spec,
    }
}

/// Flatten every rule under `spec.<direction>` into one set of peer CIDRs
/// and ports.
fn collect_rules(spec: &Node, direction: &str, peers: &str) -> (Metadata, Vec<StringValue>, Vec<Port>) {
    let Some(rules) = spec.get(direction) else {
        return (spec.metadata(), Vec::new(), Vec::new());
    };

    let mut cidrs = Vec::new();
    let mut ports = Vec::new();
    for rule in rules.items() {
        if let Some(list) = rule.get(peers) {
            cidrs.extend(
                list.items()
                    .iter()
                    .filter_map(|peer| peer.get("ipBlock.cidr"))
                    .map(|cidr| Some(cidr).as_string_value_or_default("", cidr)),
            );
        }
        if let Some(list) = rule.get("ports") {
            ports.extend(list.items().iter().map(|port| Port {
                metadata: port.metadata(),
                number: port.get_attribute("port").as_string_value_or_default("", port),
                protocol: port.get_attribute("protocol").as_string_value_or_default("TCP", port),
            }));
        }
    }
    (rules.metadata(), cidrs, ports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Value;

    fn policy(api_version: &str, spec: Vec<Node>) -> Manifest {
        Manifest::new(
            "netpol.yaml",
            Node::map(
                "",
                1,
                30,
                vec![
                    Node::scalar("apiVersion", api_version, 1),
                    Node::scalar("kind", "NetworkPolicy", 2),
                    Node::map("metadata", 3, 4, vec![Node::scalar("name", "web", 4)]),
                    Node::map("spec", 5, 30, spec),
                ],
            ),
        )
    }

    fn peer(list: &str, start: usize, cidr: &str) -> Node {
        Node::list(
            list,
            start,
            start + 2,
            vec![Node::map(
                "",
                start + 1,
                start + 2,
                vec![Node::map("ipBlock", start + 1, start + 2, vec![Node::scalar("cidr", cidr, start + 2)])],
            )],
        )
    }

    fn ports(start: usize) -> Node {
        Node::list(
            "ports",
            start,
            start + 2,
            vec![Node::map(
                "",
                start + 1,
                start + 2,
                vec![
                    Node::scalar("protocol", "TCP", start + 1),
                    Node::scalar("port", Value::Number(443.0), start + 2),
                ],
            )],
        )
    }

    #[test]
    fn ingress_and_egress_rules() {
        let manifest = policy(
            NETWORK_POLICY_API,
            vec![
                Node::list(
                    "ingress",
                    6,
                    14,
                    vec![Node::map("", 7, 14, vec![peer("from", 7, "0.0.0.0/0"), ports(10)])],
                ),
                Node::list(
                    "egress",
                    15,
                    20,
                    vec![Node::map("", 16, 20, vec![peer("to", 16, "10.0.0.0/16")])],
                ),
            ],
        );
        let state = adapt(&[manifest]);
        let np = &state.kubernetes.network_policies[0];
        assert_eq!(np.metadata.reference(), "NetworkPolicy/web");

        let ingress = &np.spec.ingress;
        assert_eq!(ingress.source_cidrs[0].as_str(), "0.0.0.0/0");
        assert_eq!(ingress.source_cidrs[0].metadata().range().start_line(), 9);
        assert_eq!(ingress.ports[0].number.as_str(), "443");
        assert_eq!(ingress.ports[0].protocol.as_str(), "TCP");
        assert_eq!(ingress.metadata.range().start_line(), 6);

        let egress = &np.spec.egress;
        assert_eq!(egress.destination_cidrs[0].as_str(), "10.0.0.0/16");
        assert!(egress.ports.is_empty());
    }

    #[test]
    fn other_api_versions_and_kinds_are_skipped() {
        let legacy = policy("extensions/v1beta1", vec![]);
        let deployment = Manifest::new(
            "deploy.yaml",
            Node::map(
                "",
                1,
                2,
                vec![
                    Node::scalar("apiVersion", "apps/v1", 1),
                    Node::scalar("kind", "Deployment", 2),
                ],
            ),
        );
        let state = adapt(&[legacy, deployment]);
        assert!(state.kubernetes.network_policies.is_empty());
    }

    #[test]
    fn empty_spec_has_no_peers() {
        let state = adapt(&[policy(NETWORK_POLICY_API, vec![])]);
        let np = &state.kubernetes.network_policies[0];
        assert!(np.spec.ingress.source_cidrs.is_empty());
        assert!(np.spec.egress.destination_cidrs.is_empty());
        assert_eq!(np.spec.ingress.metadata.range().start_line(), 5);
    }
}
