mod cloudtrail;
mod cloudwatch;
mod config;
mod ecs;
mod eks;
mod elasticache;
mod elasticsearch;
mod iam;
mod lambda;
mod mq;
mod s3;

use crate::parser::terraform::Modules;
use crate::providers::aws::Aws;

pub(super) fn adapt(modules: &Modules) -> Aws {
    Aws {
        cloudtrail: cloudtrail::adapt(modules),
        cloudwatch: cloudwatch::adapt(modules),
        config: config::adapt(modules),
        ecs: ecs::adapt(modules),
        eks: eks::adapt(modules),
        elasticache: elasticache::adapt(modules),
        elasticsearch: elasticsearch::adapt(modules),
        iam: iam::adapt(modules),
        lambda: lambda::adapt(modules),
        mq: mq::adapt(modules),
        s3: s3::adapt(modules),
        ..Aws::default()
    }
}
