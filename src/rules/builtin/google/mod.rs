mod bigquery;
mod compute;
mod gke;
mod iam;
mod sql;
mod storage;

use crate::rules::Rule;

pub(super) fn rules() -> Vec<Rule> {
    [
        bigquery::rules(),
        compute::rules(),
        gke::rules(),
        iam::rules(),
        sql::rules(),
        storage::rules(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
