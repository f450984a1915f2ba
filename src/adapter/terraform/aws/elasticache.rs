use crate::adapter::defaults::Defaults;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::aws::elasticache::{Cluster, ElastiCache, ReplicationGroup};

pub(super) fn adapt(modules: &Modules) -> ElastiCache {
    ElastiCache {
        clusters: modules
            .get_resources_by_type(&["aws_elasticache_cluster"])
            .into_iter()
            .map(adapt_cluster)
            .collect(),
        replication_groups: modules
            .get_resources_by_type(&["aws_elasticache_replication_group"])
            .into_iter()
            .map(adapt_replication_group)
            .collect(),
    }
}

fn adapt_cluster(block: &Block) -> Cluster {
    Cluster {
        metadata: block.metadata(),
        engine: block.get_attribute("engine").as_string_value_or_default("", block),
        node_type: block
            .get_attribute("node_type")
            .as_string_value_or_default("", block),
        snapshot_retention_limit: block
            .get_attribute("snapshot_retention_limit")
            .as_int_value_or_default(0, block),
    }
}

fn adapt_replication_group(block: &Block) -> ReplicationGroup {
    let defaults = Defaults::for_resource("aws_elasticache_replication_group");
    ReplicationGroup {
        metadata: block.metadata(),
        transit_encryption_enabled: defaults.bool_attr(block, "transit_encryption_enabled"),
        at_rest_encryption_enabled: defaults.bool_attr(block, "at_rest_encryption_enabled"),
    }
}
