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
mod sam;

use crate::rules::Rule;

pub(super) fn rules() -> Vec<Rule> {
    [
        cloudtrail::rules(),
        cloudwatch::rules(),
        config::rules(),
        ecs::rules(),
        eks::rules(),
        elasticache::rules(),
        elasticsearch::rules(),
        iam::rules(),
        lambda::rules(),
        mq::rules(),
        s3::rules(),
        sam::rules(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
