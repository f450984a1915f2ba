use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![postgres_configuration_log_checkpoints(), threat_alert_email_set()]
}

fn postgres_configuration_log_checkpoints() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-003", "azure", "database", "postgres-configuration-log-checkpoints"),
            Severity::Medium,
            "Ensure server parameter 'log_checkpoints' is set to 'ON' for PostgreSQL Database Server",
            "No error and query logs generated on checkpoint",
            "Enable checkpoint logging",
        ),
        |state: &State| {
            let mut results = Results::default();
            for server in &state.azure.database.postgresql_servers {
                let checkpoints = &server.config.log_checkpoints;
                if checkpoints.is_false() {
                    results.add("Database server is not configured to log checkpoints.", checkpoints.metadata());
                } else {
                    results.add_passed(&server.config.metadata);
                }
            }
            results
        },
    )
}

fn threat_alert_email_set() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-004", "azure", "database", "threat-alert-email-set"),
            Severity::Medium,
            "At least one email address is set for threat alerts",
            "Nobody will be prompty alerted in the case of a threat being detected",
            "Provide at least one email address for threat alerts",
        ),
        |state: &State| {
            let mut results = Results::default();
            for server in &state.azure.database.mssql_servers {
                for policy in &server.security_alert_policies {
                    if policy.email_addresses.is_empty() {
                        results.add("Security alert policy does not include any email addresses for notification.", &policy.metadata);
                    } else {
                        results.add_passed(&policy.metadata);
                    }
                }
            }
            results
        },
    )
}
