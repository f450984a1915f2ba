use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Iam {
    pub organizations: Vec<Organization>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub metadata: Metadata,
    pub members: Vec<Member>,
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub metadata: Metadata,
    pub member: StringValue,
    pub role: StringValue,
    pub default_service_account: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub metadata: Metadata,
    pub members: Vec<StringValue>,
    pub role: StringValue,
    pub include_default_service_account: BoolValue,
}
