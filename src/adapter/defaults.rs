//! Provider runtime defaults, in one table.
//!
//! Keyed by resource type (Terraform type or CloudFormation `Type`) and the
//! dotted path of the field inside it. Fields without an entry default to
//! the zero value of their type.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::parser::{AttributeExt, ConfigBlock};
use crate::types::{BoolValue, IntValue, StringValue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Str(&'static str),
    Int(i64),
}

static DEFAULTS: Lazy<HashMap<String, DefaultValue>> = Lazy::new(|| {
    use DefaultValue::*;
    let table: &[(&str, &str, DefaultValue)] = &[
        // AWS
        ("aws_cloudtrail", "enable_logging", Bool(true)),
        ("aws_cloudtrail", "is_multi_region_trail", Bool(false)),
        ("aws_cloudtrail", "enable_log_file_validation", Bool(false)),
        ("aws_config_configuration_aggregator", "account_aggregation_source.all_regions", Bool(false)),
        ("aws_config_configuration_aggregator", "organization_aggregation_source.all_regions", Bool(false)),
        ("aws_eks_cluster", "vpc_config.endpoint_public_access", Bool(true)),
        ("aws_elasticache_replication_group", "transit_encryption_enabled", Bool(false)),
        ("aws_elasticache_replication_group", "at_rest_encryption_enabled", Bool(false)),
        ("aws_elasticsearch_domain", "domain_endpoint_options.enforce_https", Bool(false)),
        (
            "aws_elasticsearch_domain",
            "domain_endpoint_options.tls_security_policy",
            Str("Policy-Min-TLS-1-0-2019-07"),
        ),
        ("aws_elasticsearch_domain", "log_publishing_options.enabled", Bool(true)),
        ("aws_iam_account_password_policy", "minimum_password_length", Int(6)),
        ("aws_iam_access_key", "status", Str("Active")),
        ("aws_lambda_function", "tracing_config.mode", Str("PassThrough")),
        ("aws_mq_broker", "publicly_accessible", Bool(false)),
        ("aws_s3_bucket", "acl", Str("private")),
        ("aws_ecs_task_definition", "efs_volume_configuration.transit_encryption", Str("DISABLED")),
        ("AWS::EKS::Cluster", "ResourcesVpcConfig.EndpointPublicAccess", Bool(true)),
        ("AWS::ElastiCache::ReplicationGroup", "TransitEncryptionEnabled", Bool(false)),
        ("AWS::ElastiCache::ReplicationGroup", "AtRestEncryptionEnabled", Bool(false)),
        ("AWS::AmazonMQ::Broker", "PubliclyAccessible", Bool(false)),
        ("AWS::S3::Bucket", "AccessControl", Str("private")),
        ("AWS::ECS::TaskDefinition", "EFSVolumeConfiguration.TransitEncryption", Str("DISABLED")),
        // Azure
        ("azurerm_app_service", "site_config.min_tls_version", Str("1.2")),
        ("azurerm_linux_virtual_machine", "disable_password_authentication", Bool(true)),
        ("azurerm_virtual_machine", "os_profile_linux_config.disable_password_authentication", Bool(true)),
        ("azurerm_postgresql_server", "public_network_access_enabled", Bool(true)),
        ("azurerm_postgresql_server", "ssl_minimal_tls_version_enforced", Str("TLS1_2")),
        ("azurerm_postgresql_server", "config.log_checkpoints", Bool(true)),
        ("azurerm_postgresql_server", "config.log_connections", Bool(true)),
        ("azurerm_postgresql_server", "config.connection_throttling", Bool(true)),
        ("azurerm_mssql_server", "public_network_access_enabled", Bool(true)),
        ("azurerm_mssql_server", "minimum_tls_version", Str("1.2")),
        ("azurerm_data_lake_store", "encryption_state", Str("Enabled")),
        ("azurerm_storage_account", "min_tls_version", Str("TLS1_2")),
        ("azurerm_storage_account", "enable_https_traffic_only", Bool(true)),
        ("azurerm_storage_account", "network_rules.default_action", Str("Allow")),
        ("azurerm_network_security_rule", "access", Str("Allow")),
        ("azurerm_network_security_rule", "direction", Str("Inbound")),
        // Google
        ("google_compute_instance", "metadata.enable-oslogin", Bool(true)),
        ("google_container_cluster", "enable_legacy_abac", Bool(false)),
        ("google_container_node_pool", "management.auto_repair", Bool(true)),
        ("google_container_node_pool", "management.auto_upgrade", Bool(true)),
        ("google_sql_database_instance", "settings.ip_configuration.ipv4_enabled", Bool(true)),
        ("google_storage_bucket", "uniform_bucket_level_access", Bool(false)),
        // DigitalOcean
        ("digitalocean_kubernetes_cluster", "surge_upgrade", Bool(true)),
        ("digitalocean_kubernetes_cluster", "auto_upgrade", Bool(false)),
        ("digitalocean_spaces_bucket", "acl", Str("private")),
        ("digitalocean_spaces_bucket_object", "acl", Str("private")),
    ];
    table
        .iter()
        .map(|(resource, field, value)| (format!("{resource}:{field}"), *value))
        .collect()
});

/// Default lookup for one resource type, optionally scoped to a sub-block.
#[derive(Debug, Clone)]
pub struct Defaults {
    resource_type: String,
    scope: String,
}

impl Defaults {
    pub fn for_resource(resource_type: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            scope: String::new(),
        }
    }

    /// Narrow lookups to fields of the named sub-block.
    pub fn within(&self, block: &str) -> Self {
        let scope = if self.scope.is_empty() {
            block.to_string()
        } else {
            format!("{}.{block}", self.scope)
        };
        Self {
            resource_type: self.resource_type.clone(),
            scope,
        }
    }

    fn lookup(&self, field: &str) -> Option<DefaultValue> {
        let key = if self.scope.is_empty() {
            format!("{}:{field}", self.resource_type)
        } else {
            format!("{}:{}.{field}", self.resource_type, self.scope)
        };
        DEFAULTS.get(&key).copied()
    }

    pub fn bool(&self, field: &str) -> bool {
        match self.lookup(field) {
            Some(DefaultValue::Bool(b)) => b,
            _ => false,
        }
    }

    pub fn string(&self, field: &str) -> &'static str {
        match self.lookup(field) {
            Some(DefaultValue::Str(s)) => s,
            _ => "",
        }
    }

    pub fn int(&self, field: &str) -> i64 {
        match self.lookup(field) {
            Some(DefaultValue::Int(n)) => n,
            _ => 0,
        }
    }

    /// Read `field` from `block`, falling back to the provider default.
    pub fn bool_attr<B: ConfigBlock + ?Sized>(&self, block: &B, field: &str) -> BoolValue {
        block
            .get_attribute(field)
            .as_bool_value_or_default(self.bool(field), block)
    }

    pub fn string_attr<B: ConfigBlock + ?Sized>(&self, block: &B, field: &str) -> StringValue {
        block
            .get_attribute(field)
            .as_string_value_or_default(self.string(field), block)
    }

    pub fn int_attr<B: ConfigBlock + ?Sized>(&self, block: &B, field: &str) -> IntValue {
        block
            .get_attribute(field)
            .as_int_value_or_default(self.int(field), block)
    }
}
