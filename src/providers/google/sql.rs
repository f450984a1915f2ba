use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sql {
    pub instances: Vec<DatabaseInstance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseFamily {
    Postgres,
    MySql,
    SqlServer,
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInstance {
    pub metadata: Metadata,
    pub database_version: StringValue,
    pub is_replica: BoolValue,
    pub settings: Settings,
}

impl DatabaseInstance {
    pub fn database_family(&self) -> DatabaseFamily {
        let version = self.database_version.as_str();
        if version.starts_with("POSTGRES") {
            DatabaseFamily::Postgres
        } else if version.starts_with("MYSQL") {
            DatabaseFamily::MySql
        } else if version.starts_with("SQLSERVER") {
            DatabaseFamily::SqlServer
        } else {
            DatabaseFamily::Unknown
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub metadata: Metadata,
    pub flags: Flags,
    pub backups: Backups,
    pub ip_configuration: IpConfiguration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    pub metadata: Metadata,
    pub log_checkpoints: BoolValue,
    pub log_connections: BoolValue,
    pub log_disconnections: BoolValue,
    pub local_infile: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backups {
    pub metadata: Metadata,
    pub enabled: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpConfiguration {
    pub metadata: Metadata,
    pub require_tls: BoolValue,
    pub enable_ipv4: BoolValue,
    pub authorized_networks: Vec<AuthorizedNetwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizedNetwork {
    pub metadata: Metadata,
    pub name: StringValue,
    pub cidr: StringValue,
}
