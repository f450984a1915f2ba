use crate::adapter::defaults::Defaults;
use crate::adapter::terraform::partition_children;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::digitalocean::spaces::{Bucket, Object, Spaces, Versioning};
use crate::types::{BoolValue, Metadata};

const BUCKET: &str = "digitalocean_spaces_bucket";
const OBJECT: &str = "digitalocean_spaces_bucket_object";

pub(super) fn adapt(modules: &Modules) -> Spaces {
    let blocks = modules.get_resources_by_type(&[BUCKET]);
    let (objects, orphans) =
        partition_children(&blocks, modules.get_resources_by_type(&[OBJECT]), "bucket", "name");

    let mut buckets: Vec<Bucket> = blocks
        .iter()
        .zip(objects)
        .map(|(block, objects)| {
            let defaults = Defaults::for_resource(BUCKET);
            let versioning = match block.get_block("versioning") {
                Some(v) => Versioning {
                    metadata: v.metadata(),
                    enabled: v.get_attribute("enabled").as_bool_value_or_default(false, v),
                },
                None => Versioning {
                    metadata: block.metadata(),
                    enabled: BoolValue::defaulted(false, block.metadata()),
                },
            };
            Bucket {
                metadata: block.metadata(),
                name: block.get_attribute("name").as_string_value_or_default("", *block),
                objects: objects.into_iter().map(adapt_object).collect(),
                acl: defaults.string_attr(*block, "acl"),
                force_destroy: defaults.bool_attr(*block, "force_destroy"),
                versioning,
            }
        })
        .collect();

    buckets.extend(orphans.into_iter().map(|object| Bucket {
        metadata: Metadata::unmanaged(),
        objects: vec![adapt_object(object)],
        ..Bucket::default()
    }));
    Spaces { buckets }
}

fn adapt_object(block: &Block) -> Object {
    Object {
        metadata: block.metadata(),
        acl: Defaults::for_resource(OBJECT).string_attr(block, "acl"),
    }
}
