mod appservice;
mod compute;
mod database;
mod datalake;
mod network;
mod storage;

use crate::rules::Rule;

pub(super) fn rules() -> Vec<Rule> {
    [
        appservice::rules(),
        compute::rules(),
        database::rules(),
        datalake::rules(),
        network::rules(),
        storage::rules(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
