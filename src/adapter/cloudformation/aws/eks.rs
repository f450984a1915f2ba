use crate::adapter::defaults::Defaults;
use crate::parser::cloudformation::{FileContext, Resource};
use crate::parser::{AttributeExt, ConfigBlock};
use crate::providers::aws::eks::{Cluster, Eks, Encryption, Logging};
use crate::types::{BoolValue, StringValue};

const CLUSTER: &str = "AWS::EKS::Cluster";

pub(super) fn adapt(file: &FileContext) -> Eks {
    Eks {
        clusters: file
            .get_resources_by_type(CLUSTER)
            .into_iter()
            .map(adapt_cluster)
            .collect(),
    }
}

fn adapt_cluster(resource: &Resource) -> Cluster {
    Cluster {
        metadata: resource.metadata(),
        logging: adapt_logging(resource),
        encryption: adapt_encryption(resource),
        public_access_enabled: Defaults::for_resource(CLUSTER)
            .bool_attr(resource, "ResourcesVpcConfig.EndpointPublicAccess"),
        public_access_cidrs: resource
            .get_attribute("ResourcesVpcConfig.PublicAccessCidrs")
            .as_string_values(),
    }
}

fn adapt_logging(resource: &Resource) -> Logging {
    let Some(types) = resource.get_property("Logging.ClusterLogging.EnabledTypes") else {
        let off = || BoolValue::defaulted(false, resource.metadata());
        return Logging {
            metadata: resource.metadata(),
            api: off(),
            audit: off(),
            authenticator: off(),
            controller_manager: off(),
            scheduler: off(),
        };
    };

    let enabled = |name: &str| {
        types
            .items()
            .iter()
            .find(|t| t.get("Type").and_then(|n| n.as_str()) == Some(name))
            .map(|t| BoolValue::new(true, t.metadata()))
            .unwrap_or_else(|| BoolValue::new(false, types.metadata()))
    };
    Logging {
        metadata: types.metadata(),
        api: enabled("api"),
        audit: enabled("audit"),
        authenticator: enabled("authenticator"),
        controller_manager: enabled("controllerManager"),
        scheduler: enabled("scheduler"),
    }
}

fn adapt_encryption(resource: &Resource) -> Encryption {
    // Only the first configuration is honoured, as in the EKS API.
    let Some(config) = resource.get_property("EncryptionConfig.0") else {
        return Encryption {
            metadata: resource.metadata(),
            secrets: BoolValue::defaulted(false, resource.metadata()),
            kms_key_id: StringValue::defaulted(String::new(), resource.metadata()),
        };
    };

    let secrets = match config.get("Resources") {
        Some(list) => BoolValue::new(
            Some(list).as_string_values().iter().any(|r| r.equal_to("secrets")),
            list.metadata(),
        ),
        None => BoolValue::defaulted(false, config.metadata()),
    };
    Encryption {
        metadata: config.metadata(),
        secrets,
        kms_key_id: config
            .get_attribute("Provider.KeyArn")
            .as_string_value_or_default("", config),
    }
}
