use crate::adapter::defaults::Defaults;
use crate::parser::cloudformation::FileContext;
use crate::parser::ConfigBlock;
use crate::providers::aws::elasticache::{ElastiCache, ReplicationGroup};

const REPLICATION_GROUP: &str = "AWS::ElastiCache::ReplicationGroup";

pub(super) fn adapt(file: &FileContext) -> ElastiCache {
    let defaults = Defaults::for_resource(REPLICATION_GROUP);
    ElastiCache {
        clusters: Vec::new(),
        replication_groups: file
            .get_resources_by_type(REPLICATION_GROUP)
            .into_iter()
            .map(|resource| ReplicationGroup {
                metadata: resource.metadata(),
                transit_encryption_enabled: defaults
                    .bool_attr(resource, "TransitEncryptionEnabled"),
                at_rest_encryption_enabled: defaults.bool_attr(resource, "AtRestEncryptionEnabled"),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::cloudformation::Resource;
    use crate::parser::node::Node;

    #[test]
    fn encryption_flags_default_off() {
        let file = FileContext::new(
            "cache.yaml",
            vec![
                Resource::new("Plain", REPLICATION_GROUP, 1, 3),
                Resource::new("Secure", REPLICATION_GROUP, 5, 9).with_properties(Node::map(
                    "Properties",
                    6,
                    9,
                    vec![
                        Node::scalar("TransitEncryptionEnabled", true, 7),
                        Node::scalar("AtRestEncryptionEnabled", "true", 8),
                    ],
                )),
            ],
        );
        let groups = adapt(&file).replication_groups;
        assert!(groups[0].transit_encryption_enabled.is_false());
        assert!(groups[0].at_rest_encryption_enabled.is_default());
        assert!(groups[1].transit_encryption_enabled.is_true());
        assert!(groups[1].at_rest_encryption_enabled.is_true());
        assert_eq!(groups[1].at_rest_encryption_enabled.metadata().range().start_line(), 8);
    }
}
