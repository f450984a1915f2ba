use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compute {
    pub kubernetes_clusters: Vec<KubernetesCluster>,
    pub droplets: Vec<Droplet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubernetesCluster {
    pub metadata: Metadata,
    pub surge_upgrade: BoolValue,
    pub auto_upgrade: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    pub metadata: Metadata,
    pub ssh_keys: Vec<StringValue>,
}
