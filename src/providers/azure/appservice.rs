use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppService {
    pub services: Vec<Service>,
    pub function_apps: Vec<FunctionApp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub metadata: Metadata,
    pub enable_client_cert: BoolValue,
    pub identity: Identity,
    pub authentication: Authentication,
    pub site: Site,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub metadata: Metadata,
    pub kind: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authentication {
    pub metadata: Metadata,
    pub enabled: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub metadata: Metadata,
    pub enable_http2: BoolValue,
    pub minimum_tls_version: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionApp {
    pub metadata: Metadata,
    pub https_only: BoolValue,
}
