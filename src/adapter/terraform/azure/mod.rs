mod appservice;
mod compute;
mod database;
mod datalake;
mod network;
mod storage;

use crate::parser::terraform::Modules;
use crate::providers::azure::Azure;

pub(super) fn adapt(modules: &Modules) -> Azure {
    Azure {
        appservice: appservice::adapt(modules),
        compute: compute::adapt(modules),
        database: database::adapt(modules),
        datalake: datalake::adapt(modules),
        network: network::adapt(modules),
        storage: storage::adapt(modules),
    }
}
