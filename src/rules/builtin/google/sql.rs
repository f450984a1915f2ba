use crate::providers::google::sql::DatabaseFamily;
use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_backup(), pg_log_checkpoints()]
}

fn enable_backup() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-008", "google", "sql", "enable-backup"),
            Severity::Medium,
            "Enable automated backups to recover from data-loss",
            "No recovery of lost or corrupted data",
            "Enable automated backups",
        ),
        |state: &State| {
            let mut results = Results::default();
            for instance in &state.google.sql.instances {
                if instance.metadata.is_unmanaged() {
                    continue;
                }
                if instance.is_replica.is_true() {
                    results.add_not_applicable(&instance.metadata);
                    continue;
                }
                let backups = &instance.settings.backups.enabled;
                if backups.is_false() {
                    results.add("Database instance does not have backups enabled.", backups.metadata());
                } else {
                    results.add_passed(&instance.metadata);
                }
            }
            results
        },
    )
}

fn pg_log_checkpoints() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-009", "google", "sql", "pg-log-checkpoints"),
            Severity::Medium,
            "Ensure that logging of checkpoints is enabled.",
            "Insufficient diagnostic data.",
            "Enable checkpoints logging.",
        ),
        |state: &State| {
            let mut results = Results::default();
            for instance in &state.google.sql.instances {
                if instance.metadata.is_unmanaged() {
                    continue;
                }
                if instance.database_family() != DatabaseFamily::Postgres {
                    results.add_not_applicable(&instance.metadata);
                    continue;
                }
                let checkpoints = &instance.settings.flags.log_checkpoints;
                if checkpoints.is_false() {
                    results.add("Database instance is not configured to log checkpoints.", checkpoints.metadata());
                } else {
                    results.add_passed(&instance.metadata);
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::google::sql::{DatabaseInstance, Flags, Settings};
    use crate::rules::builtin::testing::failures;
    use crate::rules::Status;
    use crate::types::{BoolValue, Metadata, StringValue};

    fn instance(version: &str, replica: bool, checkpoints: bool) -> State {
        let mut state = State::default();
        state.google.sql.instances.push(DatabaseInstance {
            metadata: Metadata::test(),
            database_version: StringValue::new(version.to_string(), Metadata::test()),
            is_replica: BoolValue::new(replica, Metadata::test()),
            settings: Settings {
                metadata: Metadata::test(),
                flags: Flags {
                    metadata: Metadata::test(),
                    log_checkpoints: BoolValue::new(checkpoints, Metadata::test()),
                    ..Flags::default()
                },
                ..Settings::default()
            },
        });
        state
    }

    #[test]
    fn checkpoint_logging() {
        assert_eq!(failures(&pg_log_checkpoints(), &instance("POSTGRES_12", false, false)).len(), 1);
        assert!(failures(&pg_log_checkpoints(), &instance("POSTGRES_12", false, true)).is_empty());
    }

    #[test]
    fn non_postgres_is_not_applicable() {
        let results = pg_log_checkpoints().evaluate(&instance("MYSQL_8_0", false, false));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, Status::NotApplicable);
    }

    #[test]
    fn replicas_skip_backup_check() {
        let results = enable_backup().evaluate(&instance("POSTGRES_12", true, true));
        assert_eq!(results[0].status, Status::NotApplicable);
        assert_eq!(failures(&enable_backup(), &instance("POSTGRES_12", false, true)).len(), 1);
    }
}
