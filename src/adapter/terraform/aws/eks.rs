use crate::adapter::defaults::Defaults;
use crate::parser::terraform::{Block, Modules};
use crate::parser::{AttributeExt, ConfigAttribute};
use crate::providers::aws::eks::{Cluster, Eks, Encryption, Logging};
use crate::types::{BoolValue, StringValue};

const CLUSTER: &str = "aws_eks_cluster";

pub(super) fn adapt(modules: &Modules) -> Eks {
    Eks {
        clusters: modules
            .get_resources_by_type(&[CLUSTER])
            .into_iter()
            .map(adapt_cluster)
            .collect(),
    }
}

fn adapt_cluster(block: &Block) -> Cluster {
    let vpc_defaults = Defaults::for_resource(CLUSTER).within("vpc_config");
    let (public_access_enabled, public_access_cidrs) = match block.get_block("vpc_config") {
        Some(vpc) => (
            vpc_defaults.bool_attr(vpc, "endpoint_public_access"),
            vpc.get_attribute("public_access_cidrs").as_string_values(),
        ),
        None => (
            BoolValue::defaulted(vpc_defaults.bool("endpoint_public_access"), block.metadata()),
            Vec::new(),
        ),
    };

    Cluster {
        metadata: block.metadata(),
        logging: adapt_logging(block),
        encryption: adapt_encryption(block),
        public_access_enabled,
        public_access_cidrs,
    }
}

fn adapt_logging(block: &Block) -> Logging {
    let Some(attr) = block.get_attribute("enabled_cluster_log_types") else {
        let off = || BoolValue::defaulted(false, block.metadata());
        return Logging {
            metadata: block.metadata(),
            api: off(),
            audit: off(),
            authenticator: off(),
            controller_manager: off(),
            scheduler: off(),
        };
    };
    let types = Some(attr).as_string_values();
    let enabled = |name: &str| BoolValue::new(types.iter().any(|t| t.equal_to(name)), attr.metadata());
    Logging {
        metadata: attr.metadata(),
        api: enabled("api"),
        audit: enabled("audit"),
        authenticator: enabled("authenticator"),
        controller_manager: enabled("controllerManager"),
        scheduler: enabled("scheduler"),
    }
}

fn adapt_encryption(block: &Block) -> Encryption {
    let Some(config) = block.get_block("encryption_config") else {
        return Encryption {
            metadata: block.metadata(),
            secrets: BoolValue::defaulted(false, block.metadata()),
            kms_key_id: StringValue::defaulted(String::new(), block.metadata()),
        };
    };

    let secrets = match config.get_attribute("resources") {
        Some(attr) => BoolValue::new(
            Some(attr).as_string_values().iter().any(|r| r.equal_to("secrets")),
            attr.metadata(),
        ),
        None => BoolValue::defaulted(false, config.metadata()),
    };
    let kms_key_id = match config.get_block("provider") {
        Some(provider) => provider
            .get_attribute("key_arn")
            .as_string_value_or_default("", provider),
        None => StringValue::defaulted(String::new(), config.metadata()),
    };

    Encryption {
        metadata: config.metadata(),
        secrets,
        kms_key_id,
    }
}
