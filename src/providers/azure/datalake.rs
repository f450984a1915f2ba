use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataLake {
    pub stores: Vec<Store>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub metadata: Metadata,
    pub enable_encryption: BoolValue,
}
