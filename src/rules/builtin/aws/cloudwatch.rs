use crate::providers::aws::cloudwatch::MetricFilter;
use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![log_group_customer_key(), require_non_mfa_login_alarm(), require_root_user_usage_alarm()]
}

fn log_group_customer_key() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-003", "aws", "cloudwatch", "log-group-customer-key"),
            Severity::Low,
            "CloudWatch log groups should be encrypted using CMK",
            "Log data may be leaked if the logs are compromised. No auditing of who have viewed the logs.",
            "Enable CMK encryption of CloudWatch Log Groups",
        ),
        |state: &State| {
            let mut results = Results::default();
            for group in &state.aws.cloudwatch.log_groups {
                if group.metadata.is_unmanaged() {
                    continue;
                }
                if group.kms_key_id.is_empty() {
                    results.add(
                        "Log group is not encrypted.",
                        group.kms_key_id.metadata(),
                    );
                } else {
                    results.add_passed(&group.metadata);
                }
            }
            results
        },
    )
}

/// For each logging multi-region trail, look for a filter on its log group
/// matching every pattern and an alarm on that filter's metric.
fn require_alarm(state: &State, patterns: &[&str], what: &str) -> Results {
    let mut results = Results::default();
    let cloudwatch = &state.aws.cloudwatch;
    for trail in state.aws.cloudtrail.multi_region_trails() {
        if trail.is_logging.is_false() {
            continue;
        }
        let Some(group) = cloudwatch.get_log_group_by_arn(trail.cloud_watch_logs_log_group_arn.as_str())
        else {
            continue;
        };

        let matches = |f: &&MetricFilter| {
            patterns
                .iter()
                .all(|p| f.filter_pattern.contains_ignoring_whitespace(p))
        };
        let Some(filter) = group.metric_filters.iter().find(matches) else {
            results.add(format!("Cloudtrail has no {what} log filter"), &trail.metadata);
            continue;
        };
        if cloudwatch
            .get_alarm_by_metric_name(filter.filter_name.as_str())
            .is_none()
        {
            results.add(format!("Cloudtrail has no {what} alarm"), &trail.metadata);
            continue;
        }
        results.add_passed(&trail.metadata);
    }
    results
}

fn require_non_mfa_login_alarm() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-004", "aws", "cloudwatch", "require-non-mfa-login-alarm"),
            Severity::Low,
            "Ensure a log metric filter and alarm exist for AWS Management Console sign-in without MFA",
            "Not alerting on logins without MFA allows the risk to go un-notified",
            "Create an alarm to alert on non MFA logins",
        ),
        |state: &State| {
            require_alarm(
                state,
                &[r#"($.eventName = "ConsoleLogin") && ($.additionalEventData.MFAUsed != "Yes")"#],
                "non-MFA login",
            )
        },
    )
}

fn require_root_user_usage_alarm() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-005", "aws", "cloudwatch", "require-root-user-usage-alarm"),
            Severity::Low,
            "Ensure a log metric filter and alarm exist for usage of root user",
            "Root user activity may go unnoticed",
            "Create an alarm to alert on root user login",
        ),
        |state: &State| {
            require_alarm(
                state,
                &[
                    r#"$.userIdentity.type = "Root""#,
                    "$.userIdentity.invokedBy NOT EXISTS",
                    r#"$.eventType != "AwsServiceEvent""#,
                ],
                "root user",
            )
        },
    )
}
