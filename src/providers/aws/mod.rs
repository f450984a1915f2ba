pub mod cloudtrail;
pub mod cloudwatch;
pub mod config;
pub mod ecs;
pub mod eks;
pub mod elasticache;
pub mod elasticsearch;
pub mod iam;
pub mod lambda;
pub mod mq;
pub mod s3;
pub mod sam;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aws {
    pub cloudtrail: cloudtrail::CloudTrail,
    pub cloudwatch: cloudwatch::CloudWatch,
    pub config: config::Config,
    pub ecs: ecs::Ecs,
    pub eks: eks::Eks,
    pub elasticache: elasticache::ElastiCache,
    pub elasticsearch: elasticsearch::Elasticsearch,
    pub iam: iam::Iam,
    pub lambda: lambda::Lambda,
    pub mq: mq::Mq,
    pub s3: s3::S3,
    pub sam: sam::Sam,
}
