use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_auto_repair(), enable_auto_upgrade(), no_legacy_authorization()]
}

fn enable_auto_repair() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-004", "google", "gke", "enable-auto-repair"),
            Severity::Low,
            "Kubernetes should have 'Automatic repair' enabled",
            "Failing nodes will require manual repair.",
            "Enable automatic repair",
        ),
        |state: &State| {
            let mut results = Results::default();
            for pool in state.google.gke.clusters.iter().flat_map(|c| &c.node_pools) {
                let repair = &pool.management.enable_auto_repair;
                if repair.is_false() {
                    results.add("Node pool does not have auto-repair enabled.", repair.metadata());
                } else {
                    results.add_passed(&pool.metadata);
                }
            }
            results
        },
    )
}

fn enable_auto_upgrade() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-005", "google", "gke", "enable-auto-upgrade"),
            Severity::Low,
            "Kubernetes should have 'Automatic upgrade' enabled",
            "Nodes will need the cluster master version manually updating",
            "Enable automatic upgrades",
        ),
        |state: &State| {
            let mut results = Results::default();
            for pool in state.google.gke.clusters.iter().flat_map(|c| &c.node_pools) {
                let upgrade = &pool.management.enable_auto_upgrade;
                if upgrade.is_false() {
                    results.add("Node pool does not have auto-upgrade enabled.", upgrade.metadata());
                } else {
                    results.add_passed(&pool.metadata);
                }
            }
            results
        },
    )
}

fn no_legacy_authorization() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-006", "google", "gke", "no-legacy-authorization"),
            Severity::High,
            "Legacy ABAC permissions are enabled.",
            "ABAC permissions are less secure than RBAC permissions",
            "Switch to using RBAC permissions",
        ),
        |state: &State| {
            let mut results = Results::default();
            for cluster in &state.google.gke.clusters {
                if cluster.metadata.is_unmanaged() {
                    continue;
                }
                if cluster.enable_legacy_abac.is_true() {
                    results.add("Cluster has legacy ABAC enabled.", cluster.enable_legacy_abac.metadata());
                } else {
                    results.add_passed(&cluster.metadata);
                }
            }
            results
        },
    )
}
