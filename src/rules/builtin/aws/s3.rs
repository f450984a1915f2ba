use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![no_public_buckets(), block_public_acls()]
}

fn no_public_buckets() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-024", "aws", "s3", "no-public-buckets"),
            Severity::High,
            "S3 Access block should restrict public bucket to limit access",
            "Public buckets can be accessed by anyone",
            "Limit the access to public buckets to only the owner or AWS Services (eg; CloudFront)",
        ),
        |state: &State| {
            let mut results = Results::default();
            for bucket in &state.aws.s3.buckets {
                match &bucket.public_access_block {
                    None => results.add(
                        "No public access block so not restricting public buckets",
                        &bucket.metadata,
                    ),
                    Some(block) if block.restrict_public_buckets.is_false() => results.add(
                        "Public access block does not restrict public buckets",
                        block.restrict_public_buckets.metadata(),
                    ),
                    Some(_) => results.add_passed(&bucket.metadata),
                }
            }
            results
        },
    )
}

fn block_public_acls() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-025", "aws", "s3", "block-public-acls"),
            Severity::High,
            "S3 Access block should block public ACL",
            "PUT calls with public ACLs specified can make objects public",
            "Enable blocking any PUT calls with a public ACL specified",
        ),
        |state: &State| {
            let mut results = Results::default();
            for bucket in &state.aws.s3.buckets {
                match &bucket.public_access_block {
                    None => results.add("No public access block so not blocking public acls", &bucket.metadata),
                    Some(block) if block.block_public_acls.is_false() => results.add(
                        "Public access block does not block public ACLs",
                        block.block_public_acls.metadata(),
                    ),
                    Some(_) => results.add_passed(&bucket.metadata),
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::aws::s3::{Bucket, PublicAccessBlock};
    use crate::rules::builtin::testing::failures;
    use crate::types::{BoolValue, Metadata};

    fn bucket(block: Option<(bool, bool)>) -> State {
        let mut state = State::default();
        state.aws.s3.buckets.push(Bucket {
            metadata: Metadata::test(),
            public_access_block: block.map(|(acls, restrict)| PublicAccessBlock {
                metadata: Metadata::test(),
                block_public_acls: BoolValue::new(acls, Metadata::test()),
                restrict_public_buckets: BoolValue::new(restrict, Metadata::test()),
                ..PublicAccessBlock::default()
            }),
            ..Bucket::default()
        });
        state
    }

    #[test]
    fn missing_block_fails_both() {
        let state = bucket(None);
        assert_eq!(failures(&no_public_buckets(), &state).len(), 1);
        assert_eq!(failures(&block_public_acls(), &state).len(), 1);
    }

    #[test]
    fn flags_are_checked_independently() {
        let state = bucket(Some((true, false)));
        assert_eq!(failures(&no_public_buckets(), &state).len(), 1);
        assert!(failures(&block_public_acls(), &state).is_empty());
    }
}
