use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_all_regions(), enable_log_validation()]
}

fn enable_all_regions() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-001", "aws", "cloudtrail", "enable-all-regions"),
            Severity::Medium,
            "Cloudtrail should be enabled in all regions regardless of where your AWS resources are generally homed",
            "Activity could be happening in a region you are not monitoring",
            "Enable Cloudtrail in all regions",
        ),
        |state: &State| {
            let mut results = Results::default();
            for trail in &state.aws.cloudtrail.trails {
                if trail.is_multi_region.is_false() {
                    results.add("Trail is not enabled across all regions.", trail.is_multi_region.metadata());
                } else {
                    results.add_passed(&trail.metadata);
                }
            }
            results
        },
    )
}

fn enable_log_validation() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-002", "aws", "cloudtrail", "enable-log-validation"),
            Severity::High,
            "Cloudtrail log validation should be enabled to prevent tampering of log data",
            "Illicit activity could be removed from the logs",
            "Turn on log validation for Cloudtrail",
        ),
        |state: &State| {
            let mut results = Results::default();
            for trail in &state.aws.cloudtrail.trails {
                if trail.enable_log_file_validation.is_false() {
                    results.add(
                        "Trail does not have log validation enabled.",
                        trail.enable_log_file_validation.metadata(),
                    );
                } else {
                    results.add_passed(&trail.metadata);
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::aws::cloudtrail::Trail;
    use crate::rules::builtin::testing::failures;
    use crate::types::{BoolValue, Metadata};

    fn state(multi_region: bool, validation: bool) -> State {
        let mut state = State::default();
        state.aws.cloudtrail.trails.push(Trail {
            metadata: Metadata::test(),
            is_multi_region: BoolValue::new(multi_region, Metadata::test()),
            enable_log_file_validation: BoolValue::new(validation, Metadata::test()),
            ..Trail::default()
        });
        state
    }

    #[test]
    fn single_region_trail_fails() {
        assert_eq!(failures(&enable_all_regions(), &state(false, true)).len(), 1);
        assert!(failures(&enable_all_regions(), &state(true, true)).is_empty());
    }

    #[test]
    fn log_validation() {
        assert_eq!(failures(&enable_log_validation(), &state(true, false)).len(), 1);
        assert!(failures(&enable_log_validation(), &state(true, true)).is_empty());
    }
}
