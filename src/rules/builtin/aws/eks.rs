use crate::rules::builtin::metadata;
use crate::rules::cidr::is_public_cidr;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![encrypt_secrets(), no_public_cluster_access(), no_public_cluster_access_to_cidr()]
}

fn encrypt_secrets() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-009", "aws", "eks", "encrypt-secrets"),
            Severity::High,
            "EKS should have the encryption of secrets enabled",
            "EKS secrets could be read if compromised",
            "Enable encryption of EKS secrets",
        ),
        |state: &State| {
            let mut results = Results::default();
            for cluster in &state.aws.eks.clusters {
                let encryption = &cluster.encryption;
                if encryption.secrets.is_false() {
                    results.add("Cluster does not have secret encryption enabled.", encryption.secrets.metadata());
                } else if encryption.secrets.is_true() && encryption.kms_key_id.is_empty() {
                    results.add(
                        "Cluster encryption requires a KMS key ID, which is missing",
                        encryption.kms_key_id.metadata(),
                    );
                } else {
                    results.add_passed(&cluster.metadata);
                }
            }
            results
        },
    )
}

fn no_public_cluster_access() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-010", "aws", "eks", "no-public-cluster-access"),
            Severity::Critical,
            "EKS Clusters should have the public access disabled",
            "EKS can be access from the internet",
            "Don't enable public access to EKS Clusters",
        ),
        |state: &State| {
            let mut results = Results::default();
            for cluster in &state.aws.eks.clusters {
                if cluster.public_access_enabled.is_true() {
                    results.add(
                        "Public cluster access is enabled.",
                        cluster.public_access_enabled.metadata(),
                    );
                } else {
                    results.add_passed(&cluster.metadata);
                }
            }
            results
        },
    )
}

fn no_public_cluster_access_to_cidr() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-011", "aws", "eks", "no-public-cluster-access-to-cidr"),
            Severity::Critical,
            "EKS cluster should not have open CIDR range for public access",
            "EKS can be accessed from the internet",
            "Don't enable public access to EKS Clusters",
        ),
        |state: &State| {
            let mut results = Results::default();
            for cluster in &state.aws.eks.clusters {
                // An unresolvable endpoint flag says nothing about exposure.
                if !cluster.public_access_enabled.is_true() {
                    results.add_passed(&cluster.metadata);
                    continue;
                }
                // No CIDRs with a public endpoint means 0.0.0.0/0.
                if cluster.public_access_cidrs.is_empty() {
                    results.add(
                        "Cluster allows access from a public CIDR: 0.0.0.0/0.",
                        cluster.public_access_enabled.metadata(),
                    );
                    continue;
                }
                let mut open = false;
                for cidr in &cluster.public_access_cidrs {
                    if is_public_cidr(cidr.as_str()) {
                        open = true;
                        results.add(
                            format!("Cluster allows access from a public CIDR: {}.", cidr.as_str()),
                            cidr.metadata(),
                        );
                    }
                }
                if !open {
                    results.add_passed(&cluster.metadata);
                }
            }
            results
        },
    )
}
