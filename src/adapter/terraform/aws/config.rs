use crate::adapter::defaults::Defaults;
use crate::parser::terraform::Modules;
use crate::parser::AttributeExt;
use crate::providers::aws::config::{Config, ConfigurationAggregator};
use crate::types::BoolValue;

const AGGREGATOR: &str = "aws_config_configuration_aggregator";

pub(super) fn adapt(modules: &Modules) -> Config {
    Config {
        configuration_aggregator: adapt_aggregator(modules),
    }
}

/// Only the first aggregator is modelled.
fn adapt_aggregator(modules: &Modules) -> ConfigurationAggregator {
    let Some(block) = modules.get_resources_by_type(&[AGGREGATOR]).into_iter().next() else {
        return ConfigurationAggregator::default();
    };

    let source = ["account_aggregation_source", "organization_aggregation_source"]
        .into_iter()
        .find_map(|name| block.get_block(name).map(|b| (name, b)));

    let source_all_regions = match source {
        Some((name, source)) => source
            .get_attribute("all_regions")
            .as_bool_value_or_default(
                Defaults::for_resource(AGGREGATOR).within(name).bool("all_regions"),
                source,
            ),
        None => BoolValue::defaulted(false, block.metadata()),
    };

    ConfigurationAggregator {
        metadata: block.metadata(),
        source_all_regions,
    }
}
