use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

/// Elasticsearch and OpenSearch domains share this model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Elasticsearch {
    pub domains: Vec<Domain>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub metadata: Metadata,
    pub domain_name: StringValue,
    pub log_publishing: LogPublishing,
    pub transit_encryption: TransitEncryption,
    pub at_rest_encryption: AtRestEncryption,
    pub endpoint: Endpoint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogPublishing {
    pub metadata: Metadata,
    pub audit_enabled: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitEncryption {
    pub metadata: Metadata,
    pub enabled: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtRestEncryption {
    pub metadata: Metadata,
    pub enabled: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub metadata: Metadata,
    pub enforce_https: BoolValue,
    pub tls_policy: StringValue,
}
