use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3 {
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub metadata: Metadata,
    pub name: StringValue,
    pub public_access_block: Option<PublicAccessBlock>,
    pub acl: StringValue,
    pub versioning: Versioning,
    pub encryption: Encryption,
    pub logging: Logging,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicAccessBlock {
    pub metadata: Metadata,
    pub block_public_acls: BoolValue,
    pub block_public_policy: BoolValue,
    pub ignore_public_acls: BoolValue,
    pub restrict_public_buckets: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Versioning {
    pub metadata: Metadata,
    pub enabled: BoolValue,
    pub mfa_delete: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encryption {
    pub metadata: Metadata,
    pub enabled: BoolValue,
    pub algorithm: StringValue,
    pub kms_key_id: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    pub metadata: Metadata,
    pub enabled: BoolValue,
    pub target_bucket: StringValue,
}
