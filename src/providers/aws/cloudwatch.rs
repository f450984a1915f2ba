use serde::{Deserialize, Serialize};

use crate::types::{IntValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudWatch {
    pub log_groups: Vec<LogGroup>,
    pub alarms: Vec<Alarm>,
}

impl CloudWatch {
    /// Log group whose ARN equals `arn`, ignoring a trailing `:*` on either side.
    pub fn get_log_group_by_arn(&self, arn: &str) -> Option<&LogGroup> {
        let wanted = arn.trim_end_matches(":*");
        if wanted.is_empty() {
            return None;
        }
        self.log_groups
            .iter()
            .find(|g| g.arn.as_str().trim_end_matches(":*") == wanted)
    }

    pub fn get_alarm_by_metric_name(&self, metric_name: &str) -> Option<&Alarm> {
        self.alarms
            .iter()
            .find(|a| a.metric_name.equal_to(metric_name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogGroup {
    pub metadata: Metadata,
    pub arn: StringValue,
    pub name: StringValue,
    pub kms_key_id: StringValue,
    pub retention_in_days: IntValue,
    pub metric_filters: Vec<MetricFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricFilter {
    pub metadata: Metadata,
    pub filter_name: StringValue,
    pub filter_pattern: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub metadata: Metadata,
    pub alarm_name: StringValue,
    pub metric_name: StringValue,
    pub dimensions: Vec<AlarmDimension>,
    pub metrics: Vec<MetricDataQuery>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlarmDimension {
    pub metadata: Metadata,
    pub name: StringValue,
    pub value: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricDataQuery {
    pub metadata: Metadata,
    pub id: StringValue,
    pub expression: StringValue,
}
