use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

const PUBLIC_READ: &str = "public-read";

pub(super) fn rules() -> Vec<Rule> {
    vec![acl_no_public_read(), disable_force_destroy()]
}

fn acl_no_public_read() -> Rule {
    Rule::new(
        metadata(
            ("CS-DIG-003", "digitalocean", "spaces", "acl-no-public-read"),
            Severity::Critical,
            "Spaces bucket or bucket object has public read acl set",
            "The contents of the space can be accessed publicly",
            "Apply a more restrictive ACL",
        ),
        |state: &State| {
            let mut results = Results::default();
            for bucket in &state.digitalocean.spaces.buckets {
                if bucket.acl.equal_to(PUBLIC_READ) {
                    results.add("Bucket is publicly exposed.", bucket.acl.metadata());
                } else if bucket.metadata.is_managed() {
                    results.add_passed(&bucket.metadata);
                }
                for object in &bucket.objects {
                    if object.acl.equal_to(PUBLIC_READ) {
                        results.add("Object is publicly exposed.", object.acl.metadata());
                    } else {
                        results.add_passed(&object.metadata);
                    }
                }
            }
            results
        },
    )
}

fn disable_force_destroy() -> Rule {
    Rule::new(
        metadata(
            ("CS-DIG-004", "digitalocean", "spaces", "disable-force-destroy"),
            Severity::Medium,
            "Force destroy is enabled on Spaces bucket which is dangerous",
            "Accidental deletion of bucket objects",
            "Don't use force destroy on bucket configuration",
        ),
        |state: &State| {
            let mut results = Results::default();
            for bucket in &state.digitalocean.spaces.buckets {
                if bucket.metadata.is_unmanaged() {
                    continue;
                }
                if bucket.force_destroy.is_true() {
                    results.add("Bucket has force-destroy enabled.", bucket.force_destroy.metadata());
                } else {
                    results.add_passed(&bucket.metadata);
                }
            }
            results
        },
    )
}
