use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![default_action_deny(), use_secure_tls_policy()]
}

fn default_action_deny() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-008", "azure", "storage", "default-action-deny"),
            Severity::Critical,
            "The default action on Storage account network rules should be set to deny",
            "Network rules that allow could cause data to be exposed publicly",
            "Set network rules to deny",
        ),
        |state: &State| {
            let mut results = Results::default();
            for account in &state.azure.storage.accounts {
                for rule in &account.network_rules {
                    if rule.allow_by_default.is_true() {
                        results.add(
                            "Network rules allow access by default.",
                            rule.allow_by_default.metadata(),
                        );
                    } else {
                        results.add_passed(&rule.metadata);
                    }
                }
            }
            results
        },
    )
}

fn use_secure_tls_policy() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-009", "azure", "storage", "use-secure-tls-policy"),
            Severity::High,
            "The minimum TLS version for Storage Accounts should be TLS1_2",
            "The TLS version being outdated and has known vulnerabilities",
            "Use a more recent TLS/SSL policy for the load balancer",
        ),
        |state: &State| {
            let mut results = Results::default();
            for account in &state.azure.storage.accounts {
                if account.metadata.is_unmanaged() {
                    continue;
                }
                let tls = &account.minimum_tls_version;
                if !tls.is_one_of(&["TLS1_2", "TLS1_3"]) {
                    results.add("Storage account uses an insecure TLS version.", tls.metadata());
                } else {
                    results.add_passed(&account.metadata);
                }
            }
            results
        },
    )
}
