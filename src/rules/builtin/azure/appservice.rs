use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![use_secure_tls_policy()]
}

fn use_secure_tls_policy() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-001", "azure", "appservice", "use-secure-tls-policy"),
            Severity::High,
            "Web App uses latest TLS version",
            "The minimum TLS version for apps should be TLS1_2",
            "The TLS version being outdated and has known vulnerabilities",
        ),
        |state: &State| {
            let mut results = Results::default();
            for service in &state.azure.appservice.services {
                if service.metadata.is_unmanaged() {
                    continue;
                }
                let tls = &service.site.minimum_tls_version;
                if !tls.is_one_of(&["1.2", "1.3"]) {
                    results.add("App service does not require a secure TLS version.", tls.metadata());
                } else {
                    results.add_passed(&service.metadata);
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::azure::appservice::{Service, Site};
    use crate::rules::builtin::testing::failures;
    use crate::types::{Metadata, StringValue};

    fn service(tls: &str) -> State {
        let mut state = State::default();
        state.azure.appservice.services.push(Service {
            metadata: Metadata::test(),
            site: Site {
                metadata: Metadata::test(),
                minimum_tls_version: StringValue::new(tls.to_string(), Metadata::test()),
                ..Site::default()
            },
            ..Service::default()
        });
        state
    }

    #[test]
    fn old_tls_fails() {
        assert_eq!(failures(&use_secure_tls_policy(), &service("1.0")).len(), 1);
        assert!(failures(&use_secure_tls_policy(), &service("1.2")).is_empty());
    }
}
