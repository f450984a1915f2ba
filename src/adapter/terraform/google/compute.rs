use crate::adapter::defaults::Defaults;
use crate::parser::terraform::{Block, Modules};
use crate::parser::{AttributeExt, ConfigAttribute, Value};
use crate::providers::google::compute::{Compute, Disk, DiskEncryption, Instance};
use crate::types::{BoolValue, BytesValue, StringValue};

const INSTANCE: &str = "google_compute_instance";

pub(super) fn adapt(modules: &Modules) -> Compute {
    Compute {
        disks: modules
            .get_resources_by_type(&["google_compute_disk"])
            .into_iter()
            .map(|b| adapt_disk(modules, b))
            .collect(),
        instances: modules
            .get_resources_by_type(&[INSTANCE])
            .into_iter()
            .map(|b| adapt_instance(modules, b))
            .collect(),
    }
}

fn adapt_disk(modules: &Modules, block: &Block) -> Disk {
    let encryption = match block.get_block("disk_encryption_key") {
        Some(key) => DiskEncryption {
            metadata: key.metadata(),
            raw_key: key.get_attribute("raw_key").as_bytes_value_or_default(&[], key),
            kms_key_link: kms_key_link(modules, key, "kms_key_self_link"),
        },
        None => DiskEncryption {
            metadata: block.metadata(),
            raw_key: BytesValue::defaulted(Vec::new(), block.metadata()),
            kms_key_link: StringValue::defaulted(String::new(), block.metadata()),
        },
    };
    Disk {
        metadata: block.metadata(),
        name: block.get_attribute("name").as_string_value_or_default("", block),
        encryption,
    }
}

/// A key declared in the same configuration is identified by its address.
fn kms_key_link(modules: &Modules, block: &Block, name: &str) -> StringValue {
    let attr = block.get_attribute(name);
    if let Some(a) = attr.filter(|a| a.is_resource_block_reference("google_kms_crypto_key")) {
        if let Ok(key) = modules.get_referenced_block(a, block) {
            return StringValue::new(key.full_name(), a.metadata());
        }
    }
    attr.as_string_value_or_default("", block)
}

fn adapt_instance(modules: &Modules, block: &Block) -> Instance {
    Instance {
        metadata: block.metadata(),
        name: block.get_attribute("name").as_string_value_or_default("", block),
        os_login_enabled: os_login(block),
        can_ip_forward: block
            .get_attribute("can_ip_forward")
            .as_bool_value_or_default(false, block),
        boot_disks: block
            .get_blocks("boot_disk")
            .into_iter()
            .map(|disk| Disk {
                metadata: disk.metadata(),
                name: disk.get_attribute("source").as_string_value_or_default("", disk),
                encryption: DiskEncryption {
                    metadata: disk.metadata(),
                    raw_key: disk
                        .get_attribute("disk_encryption_key_raw")
                        .as_bytes_value_or_default(&[], disk),
                    kms_key_link: kms_key_link(modules, disk, "kms_key_self_link"),
                },
            })
            .collect(),
    }
}

/// `metadata = { enable-oslogin = ... }` overrides the project setting.
fn os_login(block: &Block) -> BoolValue {
    let default = Defaults::for_resource(INSTANCE)
        .within("metadata")
        .bool("enable-oslogin");
    let Some(attr) = block.get_attribute("metadata") else {
        return BoolValue::defaulted(default, block.metadata());
    };
    match attr.value.get("enable-oslogin") {
        Some(Value::Bool(b)) => BoolValue::new(*b, attr.metadata()),
        Some(Value::String(s)) => BoolValue::new(
            s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") || s == "1",
            attr.metadata(),
        ),
        Some(Value::Reference(_)) => BoolValue::unresolvable(default, attr.metadata()),
        _ => BoolValue::defaulted(default, attr.metadata()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::modules;

    #[test]
    fn disk_kms_key_resolves_to_key_address() {
        let m = modules(vec![
            Block::resource("google_kms_crypto_key", "my_crypto_key").lines(1, 4),
            Block::resource("google_compute_disk", "disk")
                .lines(6, 12)
                .with_attribute("name", "disk #1", 7)
                .with_block(
                    Block::nested("disk_encryption_key")
                        .lines(8, 11)
                        .with_attribute(
                            "kms_key_self_link",
                            Value::reference("google_kms_crypto_key.my_crypto_key.id"),
                            9,
                        ),
                ),
            Block::resource("google_compute_disk", "raw").with_block(
                Block::nested("disk_encryption_key").with_attribute("raw_key", "b2ggbm8gdGhpcyBpcyBiYWQ=", 16),
            ),
        ]);
        let disks = adapt(&m).disks;
        assert_eq!(disks[0].encryption.kms_key_link.as_str(), "google_kms_crypto_key.my_crypto_key");
        assert_eq!(disks[0].encryption.kms_key_link.metadata().range().start_line(), 9);
        assert!(disks[0].encryption.raw_key.is_empty());
        assert!(!disks[1].encryption.raw_key.is_empty());
    }

    #[test]
    fn os_login_metadata() {
        let m = modules(vec![
            Block::resource(INSTANCE, "off").with_attribute(
                "metadata",
                Value::object([("enable-oslogin", Value::from(false))]),
                3,
            ),
            Block::resource(INSTANCE, "str").with_attribute(
                "metadata",
                Value::object([("enable-oslogin", Value::from("FALSE"))]),
                6,
            ),
            Block::resource(INSTANCE, "default")
                .with_attribute("can_ip_forward", true, 9)
                .with_block(
                    Block::nested("boot_disk").with_attribute("disk_encryption_key_raw", "secret", 11),
                ),
        ]);
        let instances = adapt(&m).instances;
        assert!(instances[0].os_login_enabled.is_false());
        assert!(instances[1].os_login_enabled.is_false());
        assert!(instances[2].os_login_enabled.is_true());
        assert!(instances[2].os_login_enabled.is_default());
        assert!(instances[2].can_ip_forward.is_true());
        assert_eq!(instances[2].boot_disks[0].encryption.raw_key.len(), 6);
    }
}
