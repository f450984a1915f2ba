use crate::adapter::defaults::Defaults;
use crate::adapter::terraform::partition_children;
use crate::parser::terraform::{Block, Modules};
use crate::providers::google::gke::{Cluster, Gke, Management, NodePool};
use crate::types::{BoolValue, Metadata};

const CLUSTER: &str = "google_container_cluster";
const NODE_POOL: &str = "google_container_node_pool";

pub(super) fn adapt(modules: &Modules) -> Gke {
    let blocks = modules.get_resources_by_type(&[CLUSTER]);
    let (pools, orphans) = partition_children(
        &blocks,
        modules.get_resources_by_type(&[NODE_POOL]),
        "cluster",
        "name",
    );

    let mut clusters: Vec<Cluster> = blocks
        .iter()
        .zip(pools)
        .map(|(block, pools)| {
            let defaults = Defaults::for_resource(CLUSTER);
            Cluster {
                metadata: block.metadata(),
                node_pools: block
                    .get_blocks("node_pool")
                    .into_iter()
                    .chain(pools)
                    .map(adapt_node_pool)
                    .collect(),
                enable_legacy_abac: defaults.bool_attr(*block, "enable_legacy_abac"),
                remove_default_node_pool: defaults.bool_attr(*block, "remove_default_node_pool"),
            }
        })
        .collect();

    clusters.extend(orphans.into_iter().map(|pool| Cluster {
        metadata: Metadata::unmanaged(),
        node_pools: vec![adapt_node_pool(pool)],
        enable_legacy_abac: BoolValue::defaulted(false, Metadata::unmanaged()),
        remove_default_node_pool: BoolValue::defaulted(false, Metadata::unmanaged()),
    }));
    Gke { clusters }
}

/// Inline `node_pool` blocks and separate node pool resources share a schema.
fn adapt_node_pool(block: &Block) -> NodePool {
    let defaults = Defaults::for_resource(NODE_POOL).within("management");
    let management = match block.get_block("management") {
        Some(m) => Management {
            metadata: m.metadata(),
            enable_auto_repair: defaults.bool_attr(m, "auto_repair"),
            enable_auto_upgrade: defaults.bool_attr(m, "auto_upgrade"),
        },
        None => Management {
            metadata: block.metadata(),
            enable_auto_repair: BoolValue::defaulted(defaults.bool("auto_repair"), block.metadata()),
            enable_auto_upgrade: BoolValue::defaulted(defaults.bool("auto_upgrade"), block.metadata()),
        },
    };
    NodePool {
        metadata: block.metadata(),
        management,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Value;
    use crate::test_util::modules;

    #[test]
    fn node_pools_inline_and_separate() {
        let m = modules(vec![
            Block::resource(CLUSTER, "primary")
                .with_attribute("name", "primary", 2)
                .with_attribute("enable_legacy_abac", true, 3)
                .with_block(Block::nested("node_pool").lines(4, 6)),
            Block::resource(NODE_POOL, "pool")
                .with_attribute("cluster", Value::reference("google_container_cluster.primary.id"), 9)
                .with_block(
                    Block::nested("management")
                        .lines(10, 13)
                        .with_attribute("auto_repair", false, 11),
                ),
            Block::resource(NODE_POOL, "orphan").with_attribute("cluster", "elsewhere", 16),
        ]);
        let clusters = adapt(&m).clusters;
        assert_eq!(clusters.len(), 2);

        let primary = &clusters[0];
        assert!(primary.enable_legacy_abac.is_true());
        assert_eq!(primary.node_pools.len(), 2);
        assert!(primary.node_pools[0].management.enable_auto_repair.is_true());
        assert!(primary.node_pools[0].management.enable_auto_repair.is_default());
        assert!(primary.node_pools[1].management.enable_auto_repair.is_false());
        assert!(primary.node_pools[1].management.enable_auto_upgrade.is_true());

        assert!(clusters[1].metadata.is_unmanaged());
        assert_eq!(clusters[1].node_pools.len(), 1);
    }
}
