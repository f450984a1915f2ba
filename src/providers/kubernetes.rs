use serde::{Deserialize, Serialize};

use crate::types::{Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kubernetes {
    pub network_policies: Vec<NetworkPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkPolicy {
    pub metadata: Metadata,
    pub spec: NetworkPolicySpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkPolicySpec {
    pub metadata: Metadata,
    pub egress: Egress,
    pub ingress: Ingress,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Egress {
    pub metadata: Metadata,
    pub ports: Vec<Port>,
    pub destination_cidrs: Vec<StringValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingress {
    pub metadata: Metadata,
    pub ports: Vec<Port>,
    pub source_cidrs: Vec<StringValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub metadata: Metadata,
    pub number: StringValue,
    pub protocol: StringValue,
}
