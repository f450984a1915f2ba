use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub metadata: Metadata,
    pub network_rules: Vec<NetworkRule>,
    pub enforce_https: BoolValue,
    pub minimum_tls_version: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRule {
    pub metadata: Metadata,
    pub bypass: Vec<StringValue>,
    pub allow_by_default: BoolValue,
}
