use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![aggregate_all_regions()]
}

fn aggregate_all_regions() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-006", "aws", "config", "aggregate-all-regions"),
            Severity::High,
            "Config configuration aggregator should be using all regions for source",
            "Sources that aren't covered by the aggregator are not include in the configuration",
            "Set the aggregator to cover all regions",
        ),
        |state: &State| {
            let mut results = Results::default();
            let aggregator = &state.aws.config.configuration_aggregator;
            if aggregator.metadata.is_unmanaged() {
                return results;
            }
            if aggregator.source_all_regions.is_false() {
                results.add(
                    "Configuration aggregation is not set to source from all regions.",
                    aggregator.source_all_regions.metadata(),
                );
            } else {
                results.add_passed(&aggregator.metadata);
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::aws::config::ConfigurationAggregator;
    use crate::rules::builtin::testing::failures;
    use crate::types::{BoolValue, Metadata};

    #[test]
    fn single_region_aggregator_fails() {
        let mut state = State::default();
        state.aws.config.configuration_aggregator = ConfigurationAggregator {
            metadata: Metadata::test(),
            source_all_regions: BoolValue::new(false, Metadata::test()),
        };
        assert_eq!(failures(&aggregate_all_regions(), &state).len(), 1);

        state.aws.config.configuration_aggregator.source_all_regions =
            BoolValue::new(true, Metadata::test());
        assert!(failures(&aggregate_all_regions(), &state).is_empty());
    }
}
