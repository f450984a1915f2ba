use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;
use crate::types::StringValue;

const IMPERSONATION_ROLES: &[&str] = &["roles/iam.serviceAccountUser", "roles/iam.serviceAccountTokenCreator"];

fn is_impersonation_role(role: &StringValue) -> bool {
    role.is_one_of(IMPERSONATION_ROLES)
}

pub(super) fn rules() -> Vec<Rule> {
    vec![no_org_level_service_account_impersonation()]
}

fn no_org_level_service_account_impersonation() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-007", "google", "iam", "no-org-level-service-account-impersonation"),
            Severity::Medium,
            "Users should not be granted service account access at the organization level",
            "Privilege escalation, impersonation of any/all services",
            "Provide access at the service-level instead of organization-level, if required",
        ),
        |state: &State| {
            let mut results = Results::default();
            for org in &state.google.iam.organizations {
                for member in &org.members {
                    if is_impersonation_role(&member.role) {
                        results.add(
                            "Service account access is granted to a user at organization level.",
                            member.role.metadata(),
                        );
                    } else {
                        results.add_passed(&member.metadata);
                    }
                }
                for binding in &org.bindings {
                    if is_impersonation_role(&binding.role) {
                        results.add(
                            "Service account access is granted to a user at organization level.",
                            binding.role.metadata(),
                        );
                    } else {
                        results.add_passed(&binding.metadata);
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
    use crate::providers::google::iam::{Binding, Member, Organization};
    use crate::rules::builtin::testing::failures;
    use crate::types::Metadata;

    fn s(v: &str) -> StringValue {
        StringValue::new(v.to_string(), Metadata::test())
    }

    #[test]
    fn impersonation_roles_fail() {
        let mut state = State::default();
        state.google.iam.organizations.push(Organization {
            metadata: Metadata::test(),
            members: vec![Member {
                metadata: Metadata::test(),
                member: s("user:alice@example.com"),
                role: s("roles/iam.serviceAccountUser"),
                ..Member::default()
            }],
            bindings: vec![
                Binding {
                    metadata: Metadata::test(),
                    role: s("roles/iam.serviceAccountTokenCreator"),
                    ..Binding::default()
                },
                Binding {
                    metadata: Metadata::test(),
                    role: s("roles/viewer"),
                    ..Binding::default()
                },
            ],
        });
        assert_eq!(failures(&no_org_level_service_account_impersonation(), &state).len(), 2);
    }
}
