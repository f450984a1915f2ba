//! CloudFormation adapters. Only AWS resources appear in templates.

mod aws;

use crate::parser::cloudformation::FileContext;
use crate::state::State;

pub fn adapt(file: &FileContext) -> State {
    State {
        aws: aws::adapt(file),
        ..State::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_template_is_empty_state() {
        assert_eq!(adapt(&FileContext::new("empty.yaml", vec![])), State::default());
    }
}
