//! The aggregate every rule reads from.

use serde::{Deserialize, Serialize};

use crate::providers::aws::Aws;
use crate::providers::azure::Azure;
use crate::providers::digitalocean::DigitalOcean;
use crate::providers::google::Google;
use crate::providers::kubernetes::Kubernetes;

/// All adapted resources for one scan. `State::default()` is the empty state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub aws: Aws,
    pub azure: Azure,
    pub google: Google,
    pub digitalocean: DigitalOcean,
    pub kubernetes: Kubernetes,
}
