use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub configuration_aggregator: ConfigurationAggregator,
}

/// Unmanaged (the default) when no aggregator is declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationAggregator {
    pub metadata: Metadata,
    pub source_all_regions: BoolValue,
}
