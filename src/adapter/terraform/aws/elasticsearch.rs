use crate::adapter::defaults::Defaults;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::aws::elasticsearch::{
    AtRestEncryption, Domain, Elasticsearch, Endpoint, LogPublishing, TransitEncryption,
};
use crate::types::{BoolValue, StringValue};

/// OpenSearch domains share the Elasticsearch schema for everything checked here.
const DOMAIN_TYPES: &[&str] = &["aws_elasticsearch_domain", "aws_opensearch_domain"];

pub(super) fn adapt(modules: &Modules) -> Elasticsearch {
    Elasticsearch {
        domains: modules
            .get_resources_by_type(DOMAIN_TYPES)
            .into_iter()
            .map(adapt_domain)
            .collect(),
    }
}

fn adapt_domain(block: &Block) -> Domain {
    let defaults = Defaults::for_resource("aws_elasticsearch_domain");

    let mut log_publishing = LogPublishing {
        metadata: block.metadata(),
        audit_enabled: BoolValue::defaulted(false, block.metadata()),
    };
    for options in block.get_blocks("log_publishing_options") {
        let log_type = options
            .get_attribute("log_type")
            .as_string_value_or_default("", options);
        if log_type.equal_to("AUDIT_LOGS") {
            log_publishing = LogPublishing {
                metadata: options.metadata(),
                audit_enabled: defaults
                    .within("log_publishing_options")
                    .bool_attr(options, "enabled"),
            };
        }
    }

    let transit_encryption = match block.get_block("node_to_node_encryption") {
        Some(b) => TransitEncryption {
            metadata: b.metadata(),
            enabled: b.get_attribute("enabled").as_bool_value_or_default(false, b),
        },
        None => TransitEncryption {
            metadata: block.metadata(),
            enabled: BoolValue::defaulted(false, block.metadata()),
        },
    };

    let at_rest_encryption = match block.get_block("encrypt_at_rest") {
        Some(b) => AtRestEncryption {
            metadata: b.metadata(),
            enabled: b.get_attribute("enabled").as_bool_value_or_default(false, b),
        },
        None => AtRestEncryption {
            metadata: block.metadata(),
            enabled: BoolValue::defaulted(false, block.metadata()),
        },
    };

    let endpoint_defaults = defaults.within("domain_endpoint_options");
    let endpoint = match block.get_block("domain_endpoint_options") {
        Some(b) => Endpoint {
            metadata: b.metadata(),
            enforce_https: endpoint_defaults.bool_attr(b, "enforce_https"),
            tls_policy: endpoint_defaults.string_attr(b, "tls_security_policy"),
        },
        None => Endpoint {
            metadata: block.metadata(),
            enforce_https: BoolValue::defaulted(
                endpoint_defaults.bool("enforce_https"),
                block.metadata(),
            ),
            tls_policy: StringValue::defaulted(
                endpoint_defaults.string("tls_security_policy").to_string(),
                block.metadata(),
            ),
        },
    };

    Domain {
        metadata: block.metadata(),
        domain_name: block
            .get_attribute("domain_name")
            .as_string_value_or_default("", block),
        log_publishing,
        transit_encryption,
        at_rest_encryption,
        endpoint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::modules;

    #[test]
    fn configured_domain() {
        let m = modules(vec![Block::resource("aws_elasticsearch_domain", "example")
            .lines(2, 30)
            .with_attribute("domain_name", "domain-foo", 3)
            .with_block(
                Block::nested("node_to_node_encryption")
                    .lines(5, 7)
                    .with_attribute("enabled", true, 6),
            )
            .with_block(
                Block::nested("encrypt_at_rest")
                    .lines(9, 11)
                    .with_attribute("enabled", true, 10),
            )
            .with_block(
                Block::nested("domain_endpoint_options")
                    .lines(13, 16)
                    .with_attribute("enforce_https", true, 14)
                    .with_attribute("tls_security_policy", "Policy-Min-TLS-1-2-2019-07", 15),
            )
            .with_block(
                Block::nested("log_publishing_options")
                    .lines(18, 21)
                    .with_attribute("cloudwatch_log_group_arn", "arn:aws:logs", 19)
                    .with_attribute("log_type", "AUDIT_LOGS", 20),
            )]);
        let d = &adapt(&m).domains[0];
        assert_eq!(d.domain_name.as_str(), "domain-foo");
        assert!(d.transit_encryption.enabled.is_true());
        assert!(d.at_rest_encryption.enabled.is_true());
        assert!(d.endpoint.enforce_https.is_true());
        assert_eq!(d.endpoint.tls_policy.as_str(), "Policy-Min-TLS-1-2-2019-07");
        // enabled is optional on an audit log block and defaults to true
        assert!(d.log_publishing.audit_enabled.is_true());
        assert!(d.log_publishing.audit_enabled.is_default());
        assert_eq!(d.log_publishing.metadata.range().start_line(), 18);
    }

    #[test]
    fn opensearch_alias_and_defaults() {
        let m = modules(vec![Block::resource("aws_opensearch_domain", "o").lines(1, 2)]);
        let d = &adapt(&m).domains[0];
        assert!(d.log_publishing.audit_enabled.is_false());
        assert!(d.endpoint.enforce_https.is_false());
        assert_eq!(d.endpoint.tls_policy.as_str(), "Policy-Min-TLS-1-0-2019-07");
        assert!(d.endpoint.tls_policy.is_default());
    }
}
