use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sam {
    pub http_apis: Vec<HttpApi>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpApi {
    pub metadata: Metadata,
    pub name: StringValue,
    pub access_logging: AccessLogging,
    pub default_route_settings: RouteSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessLogging {
    pub metadata: Metadata,
    pub cloudwatch_log_group_arn: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSettings {
    pub metadata: Metadata,
    pub logging_enabled: BoolValue,
    pub data_trace_enabled: BoolValue,
    pub detailed_metrics_enabled: BoolValue,
}
