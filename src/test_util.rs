//! Helpers shared by unit tests.

use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::Value as Json;

use crate::parser::terraform::{Block, Modules};

fn strip_metadata(value: &mut Json) {
    match value {
        Json::Object(map) => {
            map.remove("metadata");
            map.values_mut().for_each(strip_metadata);
        }
        Json::Array(items) => items.iter_mut().for_each(strip_metadata),
        _ => {}
    }
}

fn without_metadata<T: Serialize>(value: &T) -> Json {
    let mut json = serde_json::to_value(value).expect("adapted value serializes");
    strip_metadata(&mut json);
    json
}

/// Compare two adapted objects on their values alone.
#[track_caller]
pub(crate) fn assert_adapted_eq<T: Serialize>(expected: &T, actual: &T) {
    assert_eq!(without_metadata(expected), without_metadata(actual));
}

pub(crate) fn modules(blocks: Vec<Block>) -> Modules {
    Modules::from_blocks(blocks)
}
