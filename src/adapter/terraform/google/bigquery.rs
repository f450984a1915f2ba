use crate::parser::terraform::Modules;
use crate::parser::AttributeExt;
use crate::providers::google::bigquery::{AccessGrant, BigQuery, Dataset};

pub(super) fn adapt(modules: &Modules) -> BigQuery {
    BigQuery {
        datasets: modules
            .get_resources_by_type(&["google_bigquery_dataset"])
            .into_iter()
            .map(|block| Dataset {
                metadata: block.metadata(),
                id: block
                    .get_attribute("dataset_id")
                    .as_string_value_or_default("", block),
                access_grants: block
                    .get_blocks("access")
                    .into_iter()
                    .map(|access| AccessGrant {
                        metadata: access.metadata(),
                        role: access.get_attribute("role").as_string_value_or_default("", access),
                        domain: access
                            .get_attribute("domain")
                            .as_string_value_or_default("", access),
                        special_group: access
                            .get_attribute("special_group")
                            .as_string_value_or_default("", access),
                    })
                    .collect(),
            })
            .collect(),
    }
}
