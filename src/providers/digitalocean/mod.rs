pub mod compute;
pub mod spaces;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalOcean {
    pub compute: compute::Compute,
    pub spaces: spaces::Spaces,
}
