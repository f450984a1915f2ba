pub mod appservice;
pub mod compute;
pub mod database;
pub mod datalake;
pub mod network;
pub mod storage;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Azure {
    pub appservice: appservice::AppService,
    pub compute: compute::Compute,
    pub database: database::Database,
    pub datalake: datalake::DataLake,
    pub network: network::Network,
    pub storage: storage::Storage,
}
