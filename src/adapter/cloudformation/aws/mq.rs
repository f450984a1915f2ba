use crate::adapter::defaults::Defaults;
use crate::parser::cloudformation::{FileContext, Resource};
use crate::parser::{AttributeExt, ConfigBlock};
use crate::providers::aws::mq::{Broker, Logging, Mq};
use crate::types::BoolValue;

const BROKER: &str = "AWS::AmazonMQ::Broker";

pub(super) fn adapt(file: &FileContext) -> Mq {
    Mq {
        brokers: file
            .get_resources_by_type(BROKER)
            .into_iter()
            .map(adapt_broker)
            .collect(),
    }
}

fn adapt_broker(resource: &Resource) -> Broker {
    let logging = match resource.get_property("Logs") {
        Some(logs) => Logging {
            metadata: logs.metadata(),
            general: logs.get_attribute("General").as_bool_value_or_default(false, logs),
            audit: logs.get_attribute("Audit").as_bool_value_or_default(false, logs),
        },
        None => Logging {
            metadata: resource.metadata(),
            general: BoolValue::defaulted(false, resource.metadata()),
            audit: BoolValue::defaulted(false, resource.metadata()),
        },
    };
    Broker {
        metadata: resource.metadata(),
        public_access: Defaults::for_resource(BROKER).bool_attr(resource, "PubliclyAccessible"),
        logging,
    }
}
