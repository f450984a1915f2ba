mod compute;
mod spaces;

use crate::parser::terraform::Modules;
use crate::providers::digitalocean::DigitalOcean;

pub(super) fn adapt(modules: &Modules) -> DigitalOcean {
    DigitalOcean {
        compute: compute::adapt(modules),
        spaces: spaces::adapt(modules),
    }
}
