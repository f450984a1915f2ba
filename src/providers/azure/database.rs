use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub postgresql_servers: Vec<PostgreSqlServer>,
    pub mssql_servers: Vec<MsSqlServer>,
}

/// Settings shared by every database server flavour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub metadata: Metadata,
    pub enable_ssl_enforcement: BoolValue,
    pub minimum_tls_version: StringValue,
    pub enable_public_network_access: BoolValue,
    pub firewall_rules: Vec<FirewallRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub metadata: Metadata,
    pub start_ip: StringValue,
    pub end_ip: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostgreSqlServer {
    pub metadata: Metadata,
    pub server: Server,
    pub config: PostgresConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub metadata: Metadata,
    pub log_checkpoints: BoolValue,
    pub connection_throttling: BoolValue,
    pub log_connections: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MsSqlServer {
    pub metadata: Metadata,
    pub server: Server,
    pub security_alert_policies: Vec<SecurityAlertPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityAlertPolicy {
    pub metadata: Metadata,
    pub email_addresses: Vec<StringValue>,
    pub disabled_alerts: Vec<StringValue>,
    pub email_account_admins: BoolValue,
}
