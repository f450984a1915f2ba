use crate::adapter::defaults::Defaults;
use crate::adapter::terraform::partition_children;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::aws::s3::{Bucket, Encryption, Logging, PublicAccessBlock, Versioning, S3};
use crate::types::{BoolValue, Metadata, StringValue};

const BUCKET: &str = "aws_s3_bucket";

pub(super) fn adapt(modules: &Modules) -> S3 {
    let blocks = modules.get_resources_by_type(&[BUCKET]);
    let (access_blocks, orphans) = partition_children(
        &blocks,
        modules.get_resources_by_type(&["aws_s3_bucket_public_access_block"]),
        "bucket",
        "bucket",
    );
    let (acls, _) = partition_children(
        &blocks,
        modules.get_resources_by_type(&["aws_s3_bucket_acl"]),
        "bucket",
        "bucket",
    );

    let mut buckets: Vec<Bucket> = blocks
        .iter()
        .zip(access_blocks)
        .zip(acls)
        .map(|((block, access), acls)| {
            let mut bucket = adapt_bucket(block);
            bucket.public_access_block = access.first().map(|b| adapt_public_access_block(b));
            if let Some(acl) = acls.last() {
                bucket.acl = acl.get_attribute("acl").as_string_value_or_default(
                    Defaults::for_resource(BUCKET).string("acl"),
                    *acl,
                );
            }
            bucket
        })
        .collect();

    buckets.extend(orphans.into_iter().map(|access| Bucket {
        metadata: Metadata::unmanaged(),
        name: StringValue::defaulted(String::new(), Metadata::unmanaged()),
        public_access_block: Some(adapt_public_access_block(access)),
        ..Bucket::default()
    }));
    S3 { buckets }
}

fn adapt_bucket(block: &Block) -> Bucket {
    let defaults = Defaults::for_resource(BUCKET);

    let versioning = match block.get_block("versioning") {
        Some(v) => Versioning {
            metadata: v.metadata(),
            enabled: v.get_attribute("enabled").as_bool_value_or_default(false, v),
            mfa_delete: v.get_attribute("mfa_delete").as_bool_value_or_default(false, v),
        },
        None => Versioning {
            metadata: block.metadata(),
            enabled: BoolValue::defaulted(false, block.metadata()),
            mfa_delete: BoolValue::defaulted(false, block.metadata()),
        },
    };

    let rule = block
        .get_block("server_side_encryption_configuration")
        .and_then(|c| c.get_block("rule"))
        .and_then(|r| r.get_block("apply_server_side_encryption_by_default"));
    let encryption = match rule {
        Some(sse) => {
            let algorithm = sse
                .get_attribute("sse_algorithm")
                .as_string_value_or_default("", sse);
            Encryption {
                metadata: sse.metadata(),
                enabled: BoolValue::new(algorithm.is_not_empty(), algorithm.metadata().clone()),
                algorithm,
                kms_key_id: sse
                    .get_attribute("kms_master_key_id")
                    .as_string_value_or_default("", sse),
            }
        }
        None => Encryption {
            metadata: block.metadata(),
            enabled: BoolValue::defaulted(false, block.metadata()),
            algorithm: StringValue::defaulted(String::new(), block.metadata()),
            kms_key_id: StringValue::defaulted(String::new(), block.metadata()),
        },
    };

    let logging = match block.get_block("logging") {
        Some(l) => {
            let target = l
                .get_attribute("target_bucket")
                .as_string_value_or_default("", l);
            Logging {
                metadata: l.metadata(),
                enabled: BoolValue::new(target.is_not_empty(), l.metadata()),
                target_bucket: target,
            }
        }
        None => Logging {
            metadata: block.metadata(),
            enabled: BoolValue::defaulted(false, block.metadata()),
            target_bucket: StringValue::defaulted(String::new(), block.metadata()),
        },
    };

    Bucket {
        metadata: block.metadata(),
        name: block.get_attribute("bucket").as_string_value_or_default("", block),
        public_access_block: None,
        acl: defaults.string_attr(block, "acl"),
        versioning,
        encryption,
        logging,
    }
}

fn adapt_public_access_block(block: &Block) -> PublicAccessBlock {
    let flag = |name: &str| block.get_attribute(name).as_bool_value_or_default(false, block);
    PublicAccessBlock {
        metadata: block.metadata(),
        block_public_acls: flag("block_public_acls"),
        block_public_policy: flag("block_public_policy"),
        ignore_public_acls: flag("ignore_public_acls"),
        restrict_public_buckets: flag("restrict_public_buckets"),
    }
}
