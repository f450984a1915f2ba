use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudTrail {
    pub trails: Vec<Trail>,
}

impl CloudTrail {
    pub fn multi_region_trails(&self) -> impl Iterator<Item = &Trail> {
        self.trails.iter().filter(|t| t.is_multi_region.is_true())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub metadata: Metadata,
    pub name: StringValue,
    pub enable_log_file_validation: BoolValue,
    pub is_multi_region: BoolValue,
    pub kms_key_id: StringValue,
    pub cloud_watch_logs_log_group_arn: StringValue,
    pub is_logging: BoolValue,
    pub bucket_name: StringValue,
}
