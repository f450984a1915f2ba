mod bigquery;
mod compute;
mod gke;
mod iam;
mod sql;
mod storage;

use crate::parser::terraform::Modules;
use crate::providers::google::Google;

pub(super) fn adapt(modules: &Modules) -> Google {
    Google {
        bigquery: bigquery::adapt(modules),
        compute: compute::adapt(modules),
        gke: gke::adapt(modules),
        iam: iam::adapt(modules),
        sql: sql::adapt(modules),
        storage: storage::adapt(modules),
    }
}
