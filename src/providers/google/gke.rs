use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gke {
    pub clusters: Vec<Cluster>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub metadata: Metadata,
    pub node_pools: Vec<NodePool>,
    pub enable_legacy_abac: BoolValue,
    pub remove_default_node_pool: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePool {
    pub metadata: Metadata,
    pub management: Management,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Management {
    pub metadata: Metadata,
    pub enable_auto_repair: BoolValue,
    pub enable_auto_upgrade: BoolValue,
}
