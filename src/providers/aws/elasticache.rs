use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, IntValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElastiCache {
    pub clusters: Vec<Cluster>,
    pub replication_groups: Vec<ReplicationGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub metadata: Metadata,
    pub engine: StringValue,
    pub node_type: StringValue,
    pub snapshot_retention_limit: IntValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationGroup {
    pub metadata: Metadata,
    pub transit_encryption_enabled: BoolValue,
    pub at_rest_encryption_enabled: BoolValue,
}
