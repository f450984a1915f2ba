use crate::adapter::defaults::Defaults;
use crate::parser::terraform::Modules;
use crate::parser::AttributeExt;
use crate::providers::google::storage::{Bucket, Storage};

const BUCKET: &str = "google_storage_bucket";

pub(super) fn adapt(modules: &Modules) -> Storage {
    Storage {
        buckets: modules
            .get_resources_by_type(&[BUCKET])
            .into_iter()
            .map(|block| {
                // `bucket_policy_only` is the pre-3.0 provider name.
                let ubla = block
                    .get_attribute("uniform_bucket_level_access")
                    .or_else(|| block.get_attribute("bucket_policy_only"))
                    .as_bool_value_or_default(
                        Defaults::for_resource(BUCKET).bool("uniform_bucket_level_access"),
                        block,
                    );
                Bucket {
                    metadata: block.metadata(),
                    name: block.get_attribute("name").as_string_value_or_default("", block),
                    location: block
                        .get_attribute("location")
                        .as_string_value_or_default("", block),
                    enable_uniform_bucket_level_access: ubla,
                }
            })
            .collect(),
    }
}
