mod compute;
mod spaces;

use crate::rules::Rule;

pub(super) fn rules() -> Vec<Rule> {
    [
        compute::rules(),
        spaces::rules(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
