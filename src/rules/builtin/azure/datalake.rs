use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_at_rest_encryption()]
}

fn enable_at_rest_encryption() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-005", "azure", "datalake", "enable-at-rest-encryption"),
            Severity::High,
            "Unencrypted data lake storage.",
            "Data could be read if compromised",
            "Enable encryption of data lake storage",
        ),
        |state: &State| {
            let mut results = Results::default();
            for store in &state.azure.datalake.stores {
                if store.metadata.is_unmanaged() {
                    continue;
                }
                if store.enable_encryption.is_false() {
                    results.add("Data lake store is not encrypted.", store.enable_encryption.metadata());
                } else {
                    results.add_passed(&store.metadata);
                }
            }
            results
        },
    )
}
