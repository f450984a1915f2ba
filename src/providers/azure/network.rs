use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub security_groups: Vec<SecurityGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub metadata: Metadata,
    pub rules: Vec<SecurityGroupRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupRule {
    pub metadata: Metadata,
    pub outbound: BoolValue,
    pub allow: BoolValue,
    pub source_addresses: Vec<StringValue>,
    pub source_ports: Vec<PortRange>,
    pub destination_addresses: Vec<StringValue>,
    pub destination_ports: Vec<PortRange>,
    pub protocol: StringValue,
}

/// Inclusive port range. `*` is stored as 0-65535.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortRange {
    pub metadata: Metadata,
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    pub fn includes(&self, port: u16) -> bool {
        self.start <= port && port <= self.end
    }
}
