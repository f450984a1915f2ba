use serde::{Deserialize, Serialize};

use crate::types::{Metadata, StringValue};

pub const TRACING_MODE_ACTIVE: &str = "Active";
pub const TRACING_MODE_PASS_THROUGH: &str = "PassThrough";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub metadata: Metadata,
    pub tracing: Tracing,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracing {
    pub metadata: Metadata,
    pub mode: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub metadata: Metadata,
    pub principal: StringValue,
    pub source_arn: StringValue,
}
