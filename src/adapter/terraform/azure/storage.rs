use crate::adapter::defaults::Defaults;
use crate::adapter::string_flag;
use crate::adapter::terraform::partition_children;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::azure::storage::{Account, NetworkRule, Storage};
use crate::types::Metadata;

const ACCOUNT: &str = "azurerm_storage_account";

pub(super) fn adapt(modules: &Modules) -> Storage {
    let blocks = modules.get_resources_by_type(&[ACCOUNT]);
    let rule_resources = modules.get_resources_by_type(&["azurerm_storage_account_network_rules"]);
    let (by_id, rest) = partition_children(&blocks, rule_resources, "storage_account_id", "name");
    let (by_name, orphans) = partition_children(&blocks, rest, "storage_account_name", "name");

    let mut accounts: Vec<Account> = blocks
        .iter()
        .zip(by_id.into_iter().zip(by_name))
        .map(|(block, (by_id, by_name))| {
            let defaults = Defaults::for_resource(ACCOUNT);
            Account {
                metadata: block.metadata(),
                network_rules: block
                    .get_blocks("network_rules")
                    .into_iter()
                    .chain(by_id)
                    .chain(by_name)
                    .map(adapt_network_rule)
                    .collect(),
                enforce_https: match block.get_attribute("https_traffic_only_enabled") {
                    Some(attr) => Some(attr).as_bool_value_or_default(true, *block),
                    None => defaults.bool_attr(*block, "enable_https_traffic_only"),
                },
                minimum_tls_version: defaults.string_attr(*block, "min_tls_version"),
            }
        })
        .collect();

    accounts.extend(orphans.into_iter().map(|rule| Account {
        metadata: Metadata::unmanaged(),
        network_rules: vec![adapt_network_rule(rule)],
        ..Account::default()
    }));
    Storage { accounts }
}

fn adapt_network_rule(block: &Block) -> NetworkRule {
    let default_action = Defaults::for_resource(ACCOUNT)
        .within("network_rules")
        .string_attr(block, "default_action");
    NetworkRule {
        metadata: block.metadata(),
        bypass: block.get_attribute("bypass").as_string_values(),
        allow_by_default: string_flag(default_action, "Allow"),
    }
}
