use crate::adapter::defaults::Defaults;
use crate::adapter::string_flag;
use crate::adapter::terraform::partition_children;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::azure::database::{
    Database, FirewallRule, MsSqlServer, PostgreSqlServer, PostgresConfig, SecurityAlertPolicy,
    Server,
};
use crate::types::{BoolValue, Metadata};

const POSTGRES: &str = "azurerm_postgresql_server";
const MSSQL_TYPES: &[&str] = &["azurerm_mssql_server", "azurerm_sql_server"];

pub(super) fn adapt(modules: &Modules) -> Database {
    Database {
        postgresql_servers: adapt_postgresql_servers(modules),
        mssql_servers: adapt_mssql_servers(modules),
    }
}

/// Children link to their server by name or, for newer resources, by id.
fn children_of<'a>(
    servers: &[&Block],
    children: Vec<&'a Block>,
) -> (Vec<Vec<&'a Block>>, Vec<&'a Block>) {
    let (mut assigned, orphans) = partition_children(servers, children, "server_name", "name");
    let (by_id, orphans) = partition_children(servers, orphans, "server_id", "name");
    for (mine, extra) in assigned.iter_mut().zip(by_id) {
        mine.extend(extra);
    }
    (assigned, orphans)
}

fn adapt_postgresql_servers(modules: &Modules) -> Vec<PostgreSqlServer> {
    let blocks = modules.get_resources_by_type(&[POSTGRES]);
    let (rules, _) = children_of(
        &blocks,
        modules.get_resources_by_type(&["azurerm_postgresql_firewall_rule"]),
    );
    let (configs, orphan_configs) = children_of(
        &blocks,
        modules.get_resources_by_type(&["azurerm_postgresql_configuration"]),
    );

    let mut servers: Vec<PostgreSqlServer> = blocks
        .iter()
        .zip(rules)
        .zip(configs)
        .map(|((block, rules), configs)| {
            let defaults = Defaults::for_resource(POSTGRES);
            PostgreSqlServer {
                metadata: block.metadata(),
                server: Server {
                    metadata: block.metadata(),
                    enable_ssl_enforcement: block
                        .get_attribute("ssl_enforcement_enabled")
                        .as_bool_value_or_default(false, *block),
                    minimum_tls_version: defaults
                        .string_attr(*block, "ssl_minimal_tls_version_enforced"),
                    enable_public_network_access: defaults
                        .bool_attr(*block, "public_network_access_enabled"),
                    firewall_rules: rules.into_iter().map(adapt_firewall_rule).collect(),
                },
                config: adapt_postgres_config(block, &configs),
            }
        })
        .collect();

    servers.extend(orphan_configs.into_iter().map(|config| PostgreSqlServer {
        metadata: Metadata::unmanaged(),
        server: Server {
            metadata: Metadata::unmanaged(),
            ..Server::default()
        },
        config: adapt_postgres_config(config, &[config]),
    }));
    servers
}

/// Server parameters are separate resources with a `name` and an `on`/`off`
/// value. Unset parameters keep the server default.
fn adapt_postgres_config(server: &Block, configs: &[&Block]) -> PostgresConfig {
    let defaults = Defaults::for_resource(POSTGRES).within("config");
    let setting = |name: &str| -> BoolValue {
        configs
            .iter()
            .rev()
            .find(|c| {
                c.get_attribute("name")
                    .as_string_value_or_default("", **c)
                    .equal_to_ignoring_case(name)
            })
            .map(|c| {
                string_flag(
                    c.get_attribute("value").as_string_value_or_default("", *c),
                    "on",
                )
            })
            .unwrap_or_else(|| BoolValue::defaulted(defaults.bool(name), server.metadata()))
    };
    PostgresConfig {
        metadata: server.metadata(),
        log_checkpoints: setting("log_checkpoints"),
        connection_throttling: setting("connection_throttling"),
        log_connections: setting("log_connections"),
    }
}

fn adapt_mssql_servers(modules: &Modules) -> Vec<MsSqlServer> {
    let blocks = modules.get_resources_by_type(MSSQL_TYPES);
    let (rules, _) = children_of(
        &blocks,
        modules.get_resources_by_type(&["azurerm_sql_firewall_rule", "azurerm_mssql_firewall_rule"]),
    );
    let (policies, orphan_policies) = children_of(
        &blocks,
        modules.get_resources_by_type(&["azurerm_mssql_server_security_alert_policy"]),
    );

    let mut servers: Vec<MsSqlServer> = blocks
        .iter()
        .zip(rules)
        .zip(policies)
        .map(|((block, rules), policies)| {
            let defaults = Defaults::for_resource("azurerm_mssql_server");
            // The legacy resource declares its alert policy inline.
            let inline = block
                .get_block("threat_detection_policy")
                .map(adapt_alert_policy);
            MsSqlServer {
                metadata: block.metadata(),
                server: Server {
                    metadata: block.metadata(),
                    enable_ssl_enforcement: BoolValue::defaulted(false, block.metadata()),
                    minimum_tls_version: defaults.string_attr(*block, "minimum_tls_version"),
                    enable_public_network_access: defaults
                        .bool_attr(*block, "public_network_access_enabled"),
                    firewall_rules: rules.into_iter().map(adapt_firewall_rule).collect(),
                },
                security_alert_policies: inline
                    .into_iter()
                    .chain(policies.into_iter().map(adapt_alert_policy))
                    .collect(),
            }
        })
        .collect();

    servers.extend(orphan_policies.into_iter().map(|policy| MsSqlServer {
        metadata: Metadata::unmanaged(),
        server: Server {
            metadata: Metadata::unmanaged(),
            ..Server::default()
        },
        security_alert_policies: vec![adapt_alert_policy(policy)],
    }));
    servers
}

fn adapt_firewall_rule(block: &Block) -> FirewallRule {
    FirewallRule {
        metadata: block.metadata(),
        start_ip: block
            .get_attribute("start_ip_address")
            .as_string_value_or_default("", block),
        end_ip: block
            .get_attribute("end_ip_address")
            .as_string_value_or_default("", block),
    }
}

fn adapt_alert_policy(block: &Block) -> SecurityAlertPolicy {
    SecurityAlertPolicy {
        metadata: block.metadata(),
        email_addresses: block.get_attribute("email_addresses").as_string_values(),
        disabled_alerts: block.get_attribute("disabled_alerts").as_string_values(),
        email_account_admins: block
            .get_attribute("email_account_admins")
            .as_bool_value_or_default(false, block),
    }
}
