use crate::adapter::defaults::Defaults;
use crate::parser::terraform::Modules;
use crate::parser::AttributeExt;
use crate::providers::digitalocean::compute::{Compute, Droplet, KubernetesCluster};

const CLUSTER: &str = "digitalocean_kubernetes_cluster";

pub(super) fn adapt(modules: &Modules) -> Compute {
    Compute {
        kubernetes_clusters: modules
            .get_resources_by_type(&[CLUSTER])
            .into_iter()
            .map(|block| {
                let defaults = Defaults::for_resource(CLUSTER);
                KubernetesCluster {
                    metadata: block.metadata(),
                    surge_upgrade: defaults.bool_attr(block, "surge_upgrade"),
                    auto_upgrade: defaults.bool_attr(block, "auto_upgrade"),
                }
            })
            .collect(),
        droplets: modules
            .get_resources_by_type(&["digitalocean_droplet"])
            .into_iter()
            .map(|block| Droplet {
                metadata: block.metadata(),
                ssh_keys: block.get_attribute("ssh_keys").as_string_values(),
            })
            .collect(),
    }
}
