use crate::adapter::defaults::Defaults;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::aws::mq::{Broker, Logging, Mq};
use crate::types::BoolValue;

pub(super) fn adapt(modules: &Modules) -> Mq {
    Mq {
        brokers: modules
            .get_resources_by_type(&["aws_mq_broker"])
            .into_iter()
            .map(adapt_broker)
            .collect(),
    }
}

fn adapt_broker(block: &Block) -> Broker {
    let logging = match block.get_block("logs") {
        Some(logs) => Logging {
            metadata: logs.metadata(),
            general: logs.get_attribute("general").as_bool_value_or_default(false, logs),
            audit: logs.get_attribute("audit").as_bool_value_or_default(false, logs),
        },
        None => Logging {
            metadata: block.metadata(),
            general: BoolValue::defaulted(false, block.metadata()),
            audit: BoolValue::defaulted(false, block.metadata()),
        },
    };
    Broker {
        metadata: block.metadata(),
        public_access: Defaults::for_resource("aws_mq_broker").bool_attr(block, "publicly_accessible"),
        logging,
    }
}
