use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mq {
    pub brokers: Vec<Broker>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Broker {
    pub metadata: Metadata,
    pub public_access: BoolValue,
    pub logging: Logging,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    pub metadata: Metadata,
    pub general: BoolValue,
    pub audit: BoolValue,
}
