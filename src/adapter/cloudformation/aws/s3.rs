use crate::adapter::defaults::Defaults;
use crate::parser::cloudformation::{FileContext, Resource};
use crate::parser::{AttributeExt, ConfigBlock};
use crate::providers::aws::s3::{Bucket, Encryption, Logging, PublicAccessBlock, Versioning, S3};
use crate::types::{BoolValue, StringValue};

const BUCKET: &str = "AWS::S3::Bucket";

pub(super) fn adapt(file: &FileContext) -> S3 {
    S3 {
        buckets: file
            .get_resources_by_type(BUCKET)
            .into_iter()
            .map(adapt_bucket)
            .collect(),
    }
}

fn adapt_bucket(resource: &Resource) -> Bucket {
    Bucket {
        metadata: resource.metadata(),
        name: resource
            .get_attribute("BucketName")
            .as_string_value_or_default("", resource),
        public_access_block: resource
            .get_property("PublicAccessBlockConfiguration")
            .map(|config| {
                let flag = |name: &str| config.get_attribute(name).as_bool_value_or_default(false, config);
                PublicAccessBlock {
                    metadata: config.metadata(),
                    block_public_acls: flag("BlockPublicAcls"),
                    block_public_policy: flag("BlockPublicPolicy"),
                    ignore_public_acls: flag("IgnorePublicAcls"),
                    restrict_public_buckets: flag("RestrictPublicBuckets"),
                }
            }),
        acl: Defaults::for_resource(BUCKET).string_attr(resource, "AccessControl"),
        versioning: adapt_versioning(resource),
        encryption: adapt_encryption(resource),
        logging: adapt_logging(resource),
    }
}

fn adapt_versioning(resource: &Resource) -> Versioning {
    match resource.get_property("VersioningConfiguration") {
        Some(config) => {
            let status = config
                .get_attribute("Status")
                .as_string_value_or_default("Suspended", config);
            Versioning {
                metadata: config.metadata(),
                enabled: status.map(|s| s == "Enabled"),
                mfa_delete: BoolValue::defaulted(false, config.metadata()),
            }
        }
        None => Versioning {
            metadata: resource.metadata(),
            enabled: BoolValue::defaulted(false, resource.metadata()),
            mfa_delete: BoolValue::defaulted(false, resource.metadata()),
        },
    }
}

fn adapt_encryption(resource: &Resource) -> Encryption {
    let rule = resource.get_property(
        "BucketEncryption.ServerSideEncryptionConfiguration.0.ServerSideEncryptionByDefault",
    );
    match rule {
        Some(sse) => {
            let algorithm = sse
                .get_attribute("SSEAlgorithm")
                .as_string_value_or_default("", sse);
            Encryption {
                metadata: sse.metadata(),
                enabled: BoolValue::new(algorithm.is_not_empty(), algorithm.metadata().clone()),
                algorithm,
                kms_key_id: sse
                    .get_attribute("KMSMasterKeyID")
                    .as_string_value_or_default("", sse),
            }
        }
        None => Encryption {
            metadata: resource.metadata(),
            enabled: BoolValue::defaulted(false, resource.metadata()),
            algorithm: StringValue::defaulted(String::new(), resource.metadata()),
            kms_key_id: StringValue::defaulted(String::new(), resource.metadata()),
        },
    }
}

fn adapt_logging(resource: &Resource) -> Logging {
    match resource.get_property("LoggingConfiguration") {
        Some(config) => {
            let target = config
                .get_attribute("DestinationBucketName")
                .as_string_value_or_default("", config);
            Logging {
                metadata: config.metadata(),
                // An empty LoggingConfiguration logs to the bucket itself.
                enabled: BoolValue::new(true, config.metadata()),
                target_bucket: target,
            }
        }
        None => Logging {
            metadata: resource.metadata(),
            enabled: BoolValue::defaulted(false, resource.metadata()),
            target_bucket: StringValue::defaulted(String::new(), resource.metadata()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::node::Node;

    fn template() -> FileContext {
        FileContext::new(
            "bucket.yaml",
            vec![
                Resource::new("Bare", BUCKET, 1, 2),
                Resource::new("Site", BUCKET, 4, 40).with_properties(Node::map(
                    "Properties",
                    5,
                    40,
                    vec![
                        Node::scalar("BucketName", "site", 6),
                        Node::scalar("AccessControl", "PublicRead", 7),
                        Node::map(
                            "PublicAccessBlockConfiguration",
                            8,
                            10,
                            vec![
                                Node::scalar("BlockPublicAcls", true, 9),
                                Node::scalar("BlockPublicPolicy", true, 10),
                            ],
                        ),
                        Node::map(
                            "VersioningConfiguration",
                            11,
                            12,
                            vec![Node::scalar("Status", "Enabled", 12)],
                        ),
                        Node::map(
                            "BucketEncryption",
                            13,
                            18,
                            vec![Node::list(
                                "ServerSideEncryptionConfiguration",
                                14,
                                18,
                                vec![Node::map(
                                    "",
                                    15,
                                    18,
                                    vec![Node::map(
                                        "ServerSideEncryptionByDefault",
                                        16,
                                        18,
                                        vec![
                                            Node::scalar("SSEAlgorithm", "aws:kms", 17),
                                            Node::scalar("KMSMasterKeyID", "alias/s3", 18),
                                        ],
                                    )],
                                )],
                            )],
                        ),
                        Node::map(
                            "LoggingConfiguration",
                            19,
                            20,
                            vec![Node::scalar("DestinationBucketName", "logs", 20)],
                        ),
                    ],
                )),
            ],
        )
    }

    #[test]
    fn bare_bucket_uses_defaults() {
        let s3 = adapt(&template());
        let bare = &s3.buckets[0];
        assert_eq!(bare.acl.as_str(), "private");
        assert!(bare.acl.is_default());
        assert!(bare.public_access_block.is_none());
        assert!(bare.versioning.enabled.is_false());
        assert!(bare.encryption.enabled.is_false());
        assert!(bare.logging.enabled.is_false());
        assert_eq!(bare.metadata.range().filename(), "bucket.yaml");
    }

    #[test]
    fn configured_bucket() {
        let s3 = adapt(&template());
        let site = &s3.buckets[1];
        assert_eq!(site.name.as_str(), "site");
        assert_eq!(site.acl.as_str(), "PublicRead");
        let pab = site.public_access_block.as_ref().expect("configured");
        assert!(pab.block_public_acls.is_true());
        assert!(pab.ignore_public_acls.is_false());
        assert!(site.versioning.enabled.is_true());
        assert_eq!(site.versioning.enabled.metadata().range().start_line(), 12);
        assert!(site.encryption.enabled.is_true());
        assert_eq!(site.encryption.kms_key_id.as_str(), "alias/s3");
        assert!(site.logging.enabled.is_true());
        assert_eq!(site.logging.target_bucket.as_str(), "logs");
    }
}
