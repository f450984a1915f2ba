use crate::adapter::defaults::Defaults;
use crate::adapter::string_flag;
use crate::adapter::terraform::partition_children;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::azure::network::{Network, PortRange, SecurityGroup, SecurityGroupRule};
use crate::types::{Metadata, StringValue};

const RULE: &str = "azurerm_network_security_rule";

pub(super) fn adapt(modules: &Modules) -> Network {
    let groups = modules.get_resources_by_type(&["azurerm_network_security_group"]);
    let (attached, orphans) = partition_children(
        &groups,
        modules.get_resources_by_type(&[RULE]),
        "network_security_group_name",
        "name",
    );

    let mut security_groups: Vec<SecurityGroup> = groups
        .iter()
        .zip(attached)
        .map(|(block, attached)| SecurityGroup {
            metadata: block.metadata(),
            rules: block
                .get_blocks("security_rule")
                .into_iter()
                .chain(attached)
                .map(adapt_rule)
                .collect(),
        })
        .collect();

    if !orphans.is_empty() {
        security_groups.push(SecurityGroup {
            metadata: Metadata::unmanaged(),
            rules: orphans.into_iter().map(adapt_rule).collect(),
        });
    }

    Network { security_groups }
}

fn adapt_rule(block: &Block) -> SecurityGroupRule {
    let defaults = Defaults::for_resource(RULE);
    let direction = defaults.string_attr(block, "direction");
    let access = defaults.string_attr(block, "access");

    SecurityGroupRule {
        metadata: block.metadata(),
        outbound: string_flag(direction, "Outbound"),
        allow: string_flag(access, "Allow"),
        source_addresses: prefixes(block, "source_address_prefix"),
        source_ports: ports(block, "source_port_range"),
        destination_addresses: prefixes(block, "destination_address_prefix"),
        destination_ports: ports(block, "destination_port_range"),
        protocol: block
            .get_attribute("protocol")
            .as_string_value_or_default("", block),
    }
}

/// The singular attribute and its plural `..es` form, combined.
fn prefixes(block: &Block, singular: &str) -> Vec<StringValue> {
    let mut values = block.get_attribute(singular).as_string_values();
    values.extend(
        block
            .get_attribute(&format!("{singular}es"))
            .as_string_values(),
    );
    values
}

fn ports(block: &Block, singular: &str) -> Vec<PortRange> {
    let mut values = block.get_attribute(singular).as_string_values();
    values.extend(block.get_attribute(&format!("{singular}s")).as_string_values());
    values
        .into_iter()
        .filter_map(|v| {
            let parsed = parse_port_range(v.as_str());
            if parsed.is_none() {
                tracing::debug!(value = v.as_str(), "ignoring unparseable port range");
            }
            parsed.map(|(start, end)| PortRange {
                metadata: v.metadata().clone(),
                start,
                end,
            })
        })
        .collect()
}

/// `"22"`, `"1000-2000"` or `"*"`.
fn parse_port_range(text: &str) -> Option<(u16, u16)> {
    let text = text.trim();
    if text == "*" {
        return Some((0, u16::MAX));
    }
    match text.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (start.trim().parse().ok()?, end.trim().parse().ok()?);
            (start <= end).then_some((start, end))
        }
        None => text.parse().ok().map(|port| (port, port)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Value;
    use crate::test_util::modules;
    use proptest::prelude::*;

    #[test]
    fn inline_and_separate_rules() {
        let m = modules(vec![
            Block::resource("azurerm_network_security_group", "nsg")
                .with_attribute("name", "web", 2)
                .with_block(
                    Block::nested("security_rule")
                        .lines(3, 10)
                        .with_attribute("direction", "Outbound", 4)
                        .with_attribute("destination_address_prefix", "*", 5)
                        .with_attribute("destination_port_range", "443", 6),
                ),
            Block::resource(RULE, "ssh")
                .with_attribute("network_security_group_name", Value::reference("azurerm_network_security_group.nsg.name"), 13)
                .with_attribute("access", "Deny", 14)
                .with_attribute("source_address_prefixes", Value::strings(["10.0.0.0/8", "172.16.0.0/12"]), 15)
                .with_attribute("destination_port_ranges", Value::strings(["22", "1000-2000"]), 16),
            Block::resource(RULE, "stray").with_attribute("network_security_group_name", "other", 19),
        ]);
        let groups = adapt(&m).security_groups;
        assert_eq!(groups.len(), 2);

        let rules = &groups[0].rules;
        assert_eq!(rules.len(), 2);
        assert!(rules[0].outbound.is_true());
        assert!(rules[0].allow.is_true());
        assert!(rules[0].allow.is_default());
        assert_eq!(rules[0].destination_ports[0].start, 443);

        assert!(rules[1].outbound.is_false());
        assert!(rules[1].allow.is_false());
        assert_eq!(rules[1].source_addresses.len(), 2);
        assert!(rules[1].destination_ports[1].includes(1500));

        assert!(groups[1].metadata.is_unmanaged());
    }

    #[test]
    fn port_ranges() {
        assert_eq!(parse_port_range("*"), Some((0, 65535)));
        assert_eq!(parse_port_range(" 80 "), Some((80, 80)));
        assert_eq!(parse_port_range("2000-1000"), None);
        assert_eq!(parse_port_range("http"), None);
    }

    proptest! {
        #[test]
        fn single_ports_round_trip(port: u16) {
            prop_assert_eq!(parse_port_range(&port.to_string()), Some((port, port)));
        }
    }
}
