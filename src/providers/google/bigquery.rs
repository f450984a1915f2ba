use serde::{Deserialize, Serialize};

use crate::types::{Metadata, StringValue};

pub const SPECIAL_GROUP_ALL_AUTHENTICATED_USERS: &str = "allAuthenticatedUsers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BigQuery {
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub metadata: Metadata,
    pub id: StringValue,
    pub access_grants: Vec<AccessGrant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub metadata: Metadata,
    pub role: StringValue,
    pub domain: StringValue,
    pub special_group: StringValue,
}
