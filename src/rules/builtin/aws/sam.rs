use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_http_api_access_logging()]
}

fn enable_http_api_access_logging() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-026", "aws", "sam", "enable-http-api-access-logging"),
            Severity::Medium,
            "SAM HTTP API stages for V1 and V2 should have access logging enabled",
            "Logging provides vital information about access and usage",
            "Enable logging for API Gateway stages",
        ),
        |state: &State| {
            let mut results = Results::default();
            for api in &state.aws.sam.http_apis {
                let destination = &api.access_logging.cloudwatch_log_group_arn;
                if destination.is_empty() {
                    results.add("Access logging is not configured.", destination.metadata());
                } else {
                    results.add_passed(&api.metadata);
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::aws::sam::{AccessLogging, HttpApi};
    use crate::rules::builtin::testing::failures;
    use crate::types::{Metadata, StringValue};

    fn api(destination: &str) -> State {
        let mut state = State::default();
        state.aws.sam.http_apis.push(HttpApi {
            metadata: Metadata::test(),
            access_logging: AccessLogging {
                metadata: Metadata::test(),
                cloudwatch_log_group_arn: StringValue::new(destination.to_string(), Metadata::test()),
            },
            ..HttpApi::default()
        });
        state
    }

    #[test]
    fn access_logging_destination() {
        assert_eq!(failures(&enable_http_api_access_logging(), &api("")).len(), 1);
        assert!(failures(&enable_http_api_access_logging(), &api("arn:aws:logs:eu-west-1:1:log-group:api")).is_empty());
    }
}
