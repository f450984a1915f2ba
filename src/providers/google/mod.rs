pub mod bigquery;
pub mod compute;
pub mod gke;
pub mod iam;
pub mod sql;
pub mod storage;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Google {
    pub bigquery: bigquery::BigQuery,
    pub compute: compute::Compute,
    pub gke: gke::Gke,
    pub iam: iam::Iam,
    pub sql: sql::Sql,
    pub storage: storage::Storage,
}
