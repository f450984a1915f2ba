use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Eks {
    pub clusters: Vec<Cluster>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub metadata: Metadata,
    pub logging: Logging,
    pub encryption: Encryption,
    pub public_access_enabled: BoolValue,
    pub public_access_cidrs: Vec<StringValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    pub metadata: Metadata,
    pub api: BoolValue,
    pub audit: BoolValue,
    pub authenticator: BoolValue,
    pub controller_manager: BoolValue,
    pub scheduler: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encryption {
    pub metadata: Metadata,
    pub secrets: BoolValue,
    pub kms_key_id: StringValue,
}
