use crate::adapter::defaults::Defaults;
use crate::parser::terraform::{Block, Modules};
use crate::parser::{AttributeExt, ConfigAttribute};
use crate::providers::google::sql::{
    AuthorizedNetwork, Backups, DatabaseInstance, Flags, IpConfiguration, Settings, Sql,
};
use crate::types::BoolValue;

const INSTANCE: &str = "google_sql_database_instance";

pub(super) fn adapt(modules: &Modules) -> Sql {
    Sql {
        instances: modules
            .get_resources_by_type(&[INSTANCE])
            .into_iter()
            .map(adapt_instance)
            .collect(),
    }
}

fn adapt_instance(block: &Block) -> DatabaseInstance {
    let is_replica = match block.get_attribute("master_instance_name") {
        Some(attr) if Some(attr).is_set() => BoolValue::new(true, attr.metadata()),
        _ => BoolValue::defaulted(false, block.metadata()),
    };
    DatabaseInstance {
        metadata: block.metadata(),
        database_version: block
            .get_attribute("database_version")
            .as_string_value_or_default("", block),
        is_replica,
        settings: match block.get_block("settings") {
            Some(settings) => adapt_settings(settings),
            None => default_settings(block),
        },
    }
}

fn default_settings(block: &Block) -> Settings {
    let off = || BoolValue::defaulted(false, block.metadata());
    Settings {
        metadata: block.metadata(),
        flags: Flags {
            metadata: block.metadata(),
            log_checkpoints: off(),
            log_connections: off(),
            log_disconnections: off(),
            local_infile: off(),
        },
        backups: Backups {
            metadata: block.metadata(),
            enabled: off(),
        },
        ip_configuration: IpConfiguration {
            metadata: block.metadata(),
            require_tls: off(),
            enable_ipv4: BoolValue::defaulted(
                Defaults::for_resource(INSTANCE)
                    .within("settings.ip_configuration")
                    .bool("ipv4_enabled"),
                block.metadata(),
            ),
            authorized_networks: Vec::new(),
        },
    }
}

fn adapt_settings(settings: &Block) -> Settings {
    let mut adapted = default_settings(settings);

    for flag in settings.get_blocks("database_flags") {
        let name = flag.get_attribute("name").as_string_value_or_default("", flag);
        let value = flag.get_attribute("value").as_string_value_or_default("", flag);
        let on = BoolValue::new(
            value.equal_to_ignoring_case("on"),
            value.metadata().clone(),
        );
        match name.as_str() {
            "log_checkpoints" => adapted.flags.log_checkpoints = on,
            "log_connections" => adapted.flags.log_connections = on,
            "log_disconnections" => adapted.flags.log_disconnections = on,
            "local_infile" => adapted.flags.local_infile = on,
            _ => continue,
        }
        adapted.flags.metadata = flag.metadata();
    }

    if let Some(backup) = settings.get_block("backup_configuration") {
        adapted.backups = Backups {
            metadata: backup.metadata(),
            enabled: backup
                .get_attribute("enabled")
                .as_bool_value_or_default(false, backup),
        };
    }

    if let Some(ip) = settings.get_block("ip_configuration") {
        let defaults = Defaults::for_resource(INSTANCE).within("settings.ip_configuration");
        adapted.ip_configuration = IpConfiguration {
            metadata: ip.metadata(),
            require_tls: ip.get_attribute("require_ssl").as_bool_value_or_default(false, ip),
            enable_ipv4: defaults.bool_attr(ip, "ipv4_enabled"),
            authorized_networks: ip
                .get_blocks("authorized_networks")
                .into_iter()
                .map(|n| AuthorizedNetwork {
                    metadata: n.metadata(),
                    name: n.get_attribute("name").as_string_value_or_default("", n),
                    cidr: n.get_attribute("value").as_string_value_or_default("", n),
                })
                .collect(),
        };
    }

    adapted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::google::sql::DatabaseFamily;
    use crate::test_util::modules;

    #[test]
    fn postgres_instance_with_flags() {
        let m = modules(vec![Block::resource(INSTANCE, "db")
            .with_attribute("database_version", "POSTGRES_12", 2)
            .with_block(
                Block::nested("settings")
                    .lines(3, 20)
                    .with_block(
                        Block::nested("database_flags")
                            .lines(4, 7)
                            .with_attribute("name", "log_checkpoints", 5)
                            .with_attribute("value", "on", 6),
                    )
                    .with_block(
                        Block::nested("backup_configuration").with_attribute("enabled", true, 9),
                    )
                    .with_block(
                        Block::nested("ip_configuration")
                            .with_attribute("ipv4_enabled", false, 12)
                            .with_block(
                                Block::nested("authorized_networks")
                                    .with_attribute("name", "internet", 14)
                                    .with_attribute("value", "0.0.0.0/0", 15),
                            ),
                    ),
            )]);
        let db = &adapt(&m).instances[0];
        assert_eq!(db.database_family(), DatabaseFamily::Postgres);
        assert!(db.is_replica.is_false());
        assert!(db.settings.flags.log_checkpoints.is_true());
        assert_eq!(db.settings.flags.log_checkpoints.metadata().range().start_line(), 6);
        assert!(db.settings.flags.log_connections.is_false());
        assert!(db.settings.backups.enabled.is_true());
        assert!(db.settings.ip_configuration.enable_ipv4.is_false());
        assert_eq!(
            db.settings.ip_configuration.authorized_networks[0].cidr.as_str(),
            "0.0.0.0/0"
        );
    }

    #[test]
    fn replicas_and_defaults() {
        let m = modules(vec![
            Block::resource(INSTANCE, "replica").with_attribute("master_instance_name", "primary", 2),
            Block::resource(INSTANCE, "bare").lines(4, 5),
        ]);
        let instances = adapt(&m).instances;
        assert!(instances[0].is_replica.is_true());
        assert!(instances[1].is_replica.is_false());
        assert!(instances[1].settings.backups.enabled.is_false());
        assert!(instances[1].settings.ip_configuration.enable_ipv4.is_true());
        assert_eq!(instances[1].settings.metadata.range().start_line(), 4);
    }
}
