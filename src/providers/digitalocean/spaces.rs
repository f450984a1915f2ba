use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spaces {
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub metadata: Metadata,
    pub name: StringValue,
    pub objects: Vec<Object>,
    pub acl: StringValue,
    pub force_destroy: BoolValue,
    pub versioning: Versioning,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub metadata: Metadata,
    pub acl: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Versioning {
    pub metadata: Metadata,
    pub enabled: BoolValue,
}
