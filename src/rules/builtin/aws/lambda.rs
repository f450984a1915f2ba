use crate::providers::aws::lambda::TRACING_MODE_ACTIVE;
use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_tracing(), restrict_source_arn()]
}

fn enable_tracing() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-020", "aws", "lambda", "enable-tracing"),
            Severity::Low,
            "Lambda functions should have X-Ray tracing enabled",
            "Without full tracing enabled it is difficult to trace the flow of logs",
            "Enable tracing",
        ),
        |state: &State| {
            let mut results = Results::default();
            for function in &state.aws.lambda.functions {
                if function.metadata.is_unmanaged() {
                    continue;
                }
                let mode = &function.tracing.mode;
                if !mode.equal_to(TRACING_MODE_ACTIVE) {
                    results.add("Function does not have tracing enabled.", mode.metadata());
                } else {
                    results.add_passed(&function.metadata);
                }
            }
            results
        },
    )
}

fn restrict_source_arn() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-021", "aws", "lambda", "restrict-source-arn"),
            Severity::Critical,
            "Ensure that lambda function permission has a source arn specified",
            "Not providing the source ARN allows any resource from principal, even from other accounts",
            "Always provide a source arn for Lambda permissions",
        ),
        |state: &State| {
            let mut results = Results::default();
            for function in &state.aws.lambda.functions {
                for permission in &function.permissions {
                    if !permission.principal.ends_with(".amazonaws.com") {
                        continue;
                    }
                    if permission.source_arn.is_empty() {
                        results.add(
                            "Lambda permission lacks source ARN for *.amazonaws.com principal.",
                            permission.source_arn.metadata(),
                        );
                    } else {
                        results.add_passed(&permission.metadata);
                    }
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::aws::lambda::{Function, Permission, Tracing};
    use crate::rules::builtin::testing::failures;
    use crate::types::{Metadata, StringValue};

    fn s(v: &str) -> StringValue {
        StringValue::new(v.to_string(), Metadata::test())
    }

    fn function(mode: &str, permission: Option<(&str, &str)>, managed: bool) -> State {
        let mut state = State::default();
        state.aws.lambda.functions.push(Function {
            metadata: if managed { Metadata::test() } else { Metadata::unmanaged() },
            tracing: Tracing {
                metadata: Metadata::test(),
                mode: s(mode),
            },
            permissions: permission
                .into_iter()
                .map(|(principal, arn)| Permission {
                    metadata: Metadata::test(),
                    principal: s(principal),
                    source_arn: s(arn),
                })
                .collect(),
        });
        state
    }

    #[test]
    fn tracing_mode() {
        assert_eq!(failures(&enable_tracing(), &function("PassThrough", None, true)).len(), 1);
        assert!(failures(&enable_tracing(), &function("Active", None, true)).is_empty());
        assert!(failures(&enable_tracing(), &function("PassThrough", None, false)).is_empty());
    }

    #[test]
    fn service_permission_needs_source_arn() {
        let open = function("Active", Some(("s3.amazonaws.com", "")), false);
        assert_eq!(failures(&restrict_source_arn(), &open).len(), 1);

        let scoped = function("Active", Some(("s3.amazonaws.com", "arn:aws:s3:::bucket")), true);
        assert!(failures(&restrict_source_arn(), &scoped).is_empty());

        let account = function("Active", Some(("123456789012", "")), true);
        assert!(restrict_source_arn().evaluate(&account).is_empty());
    }
}
