use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_ubla()]
}

fn enable_ubla() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-010", "google", "storage", "enable-ubla"),
            Severity::Medium,
            "Ensure that Cloud Storage buckets have uniform bucket-level access enabled",
            "ACLs are difficult to manage and often lead to incorrect/unintended configurations.",
            "Enable uniform bucket level access to provide a uniform permissioning system.",
        ),
        |state: &State| {
            let mut results = Results::default();
            for bucket in &state.google.storage.buckets {
                if bucket.metadata.is_unmanaged() {
                    continue;
                }
                let ubla = &bucket.enable_uniform_bucket_level_access;
                if ubla.is_false() {
                    results.add("Bucket has uniform bucket level access disabled.", ubla.metadata());
                } else {
                    results.add_passed(&bucket.metadata);
                }
            }
            results
        },
    )
}
