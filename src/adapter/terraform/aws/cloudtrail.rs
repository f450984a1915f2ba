use crate::adapter::defaults::Defaults;
use crate::adapter::terraform::resolve_identity;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::aws::cloudtrail::{CloudTrail, Trail};

const TRAIL: &str = "aws_cloudtrail";

pub(super) fn adapt(modules: &Modules) -> CloudTrail {
    CloudTrail {
        trails: modules
            .get_resources_by_type(&[TRAIL])
            .into_iter()
            .map(|b| adapt_trail(modules, b))
            .collect(),
    }
}

fn adapt_trail(modules: &Modules, block: &Block) -> Trail {
    let defaults = Defaults::for_resource(TRAIL);
    Trail {
        metadata: block.metadata(),
        name: block.get_attribute("name").as_string_value_or_default("", block),
        enable_log_file_validation: defaults.bool_attr(block, "enable_log_file_validation"),
        is_multi_region: defaults.bool_attr(block, "is_multi_region_trail"),
        kms_key_id: block
            .get_attribute("kms_key_id")
            .as_string_value_or_default("", block),
        cloud_watch_logs_log_group_arn: resolve_identity(
            modules,
            block,
            block.get_attribute("cloud_watch_logs_group_arn"),
            "",
        ),
        is_logging: defaults.bool_attr(block, "enable_logging"),
        bucket_name: resolve_identity(modules, block, block.get_attribute("s3_bucket_name"), ""),
    }
}
