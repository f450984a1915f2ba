use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![kubernetes_surge_upgrades(), kubernetes_auto_upgrades()]
}

fn kubernetes_surge_upgrades() -> Rule {
    Rule::new(
        metadata(
            ("CS-DIG-001", "digitalocean", "compute", "kubernetes-surge-upgrades"),
            Severity::Medium,
            "The Kubernetes cluster does not enable surge upgrades",
            "Upgrades may influence availability of your Kubernetes cluster",
            "Enable surge upgrades in your Kubernetes cluster",
        ),
        |state: &State| {
            let mut results = Results::default();
            for cluster in &state.digitalocean.compute.kubernetes_clusters {
                if cluster.metadata.is_unmanaged() {
                    continue;
                }
                if cluster.surge_upgrade.is_false() {
                    results.add("Surge upgrades are disabled in your Kubernetes cluster.", cluster.surge_upgrade.metadata());
                } else {
                    results.add_passed(&cluster.metadata);
                }
            }
            results
        },
    )
}

fn kubernetes_auto_upgrades() -> Rule {
    Rule::new(
        metadata(
            ("CS-DIG-002", "digitalocean", "compute", "kubernetes-auto-upgrades"),
            Severity::Critical,
            "The Kubernetes cluster does not enable auto upgrades",
            "Not running the latest security patches on your Kubernetes cluster can make it a target for penetration",
            "Set maintenance policy deterministically when auto upgrades are enabled",
        ),
        |state: &State| {
            let mut results = Results::default();
            for cluster in &state.digitalocean.compute.kubernetes_clusters {
                if cluster.metadata.is_unmanaged() {
                    continue;
                }
                if cluster.auto_upgrade.is_false() {
                    results.add("Kubernetes cluster does not have auto upgrades enabled.", cluster.auto_upgrade.metadata());
                } else {
                    results.add_passed(&cluster.metadata);
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::digitalocean::compute::KubernetesCluster;
    use crate::rules::builtin::testing::failures;
    use crate::types::{BoolValue, Metadata};

    fn cluster(surge: bool, auto: bool) -> State {
        let mut state = State::default();
        state.digitalocean.compute.kubernetes_clusters.push(KubernetesCluster {
            metadata: Metadata::test(),
            surge_upgrade: BoolValue::new(surge, Metadata::test()),
            auto_upgrade: BoolValue::new(auto, Metadata::test()),
        });
        state
    }

    #[test]
    fn upgrades() {
        assert_eq!(failures(&kubernetes_surge_upgrades(), &cluster(false, true)).len(), 1);
        assert!(failures(&kubernetes_auto_upgrades(), &cluster(false, true)).is_empty());
        assert_eq!(failures(&kubernetes_auto_upgrades(), &cluster(true, false)).len(), 1);
    }
}
