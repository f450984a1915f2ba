use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![disk_encryption_no_plaintext_key(), no_oslogin_override()]
}

fn disk_encryption_no_plaintext_key() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-002", "google", "compute", "disk-encryption-no-plaintext-key"),
            Severity::Critical,
            "Disk encryption Keys should not be passed as plaintext",
            "The encryption key can be compromised as it is stored in plaintext",
            "Use managed keys or provide a raw key via a secrets manager",
        ),
        |state: &State| {
            let mut results = Results::default();
            let compute = &state.google.compute;
            let disks = compute
                .disks
                .iter()
                .chain(compute.instances.iter().flat_map(|i| &i.boot_disks));
            for disk in disks {
                let raw_key = &disk.encryption.raw_key;
                if !raw_key.is_empty() {
                    results.add("Disk encryption key is supplied in plaintext.", raw_key.metadata());
                } else {
                    results.add_passed(&disk.metadata);
                }
            }
            results
        },
    )
}

fn no_oslogin_override() -> Rule {
    Rule::new(
        metadata(
            ("CS-GCP-003", "google", "compute", "no-oslogin-override"),
            Severity::Medium,
            "Instances should not override the project setting for OS Login",
            "Access via SSH key cannot be revoked automatically when an IAM user is removed.",
            "Enable OS Login at project level and remove instance-level overrides",
        ),
        |state: &State| {
            let mut results = Results::default();
            for instance in &state.google.compute.instances {
                if instance.metadata.is_unmanaged() {
                    continue;
                }
                if instance.os_login_enabled.is_false() {
                    results.add("Instance has OS Login disabled.", instance.os_login_enabled.metadata());
                } else {
                    results.add_passed(&instance.metadata);
                }
            }
            results
        },
    )
}
