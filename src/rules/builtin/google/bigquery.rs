use crate::providers::google::bigquery::SPECIAL_GROUP_ALL_AUTHENTICATED_USERS;
use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![no_public_access()]
}

fn no_public_access() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-001", "google", "bigquery", "no-public-access"),
            Severity::Critical,
            "BigQuery datasets should only be accessible within the organisation",
            "Exposure of sensitive data to the public.",
            "Configure access permissions with higher granularity",
        ),
        |state: &State| {
            let mut results = Results::default();
            for dataset in &state.google.bigquery.datasets {
                let mut open = false;
                for grant in &dataset.access_grants {
                    if grant.special_group.equal_to(SPECIAL_GROUP_ALL_AUTHENTICATED_USERS) {
                        open = true;
                        results.add(
                            "Dataset grants access to all authenticated GCP users.",
                            grant.special_group.metadata(),
                        );
                    }
                }
                if !open {
                    results.add_passed(&dataset.metadata);
                }
            }
            results
        },
    )
}
