mod ecs;
mod eks;
mod elasticache;
mod mq;
mod s3;
mod sam;

use crate::parser::cloudformation::FileContext;
use crate::providers::aws::Aws;

pub(super) fn adapt(file: &FileContext) -> Aws {
    Aws {
        ecs: ecs::adapt(file),
        eks: eks::adapt(file),
        elasticache: elasticache::adapt(file),
        mq: mq::adapt(file),
        s3: s3::adapt(file),
        sam: sam::adapt(file),
        ..Aws::default()
    }
}
