//! Terraform adapters.

mod aws;
mod azure;
mod digitalocean;
mod google;

use crate::parser::terraform::{Attribute, Block, Modules};
use crate::parser::{AttributeExt, ConfigAttribute};
use crate::state::State;
use crate::types::StringValue;

use super::join;

/// Adapt a Terraform configuration, running provider groups in parallel.
pub fn adapt(modules: &Modules) -> State {
    adapt_with(modules, true)
}

pub fn adapt_with(modules: &Modules, parallel: bool) -> State {
    let ((aws, azure), (google, digitalocean)) = join(
        parallel,
        || {
            join(
                parallel,
                || aws::adapt(modules),
                || azure::adapt(modules),
            )
        },
        || {
            join(
                parallel,
                || google::adapt(modules),
                || digitalocean::adapt(modules),
            )
        },
    );
    State {
        aws,
        azure,
        google,
        digitalocean,
        ..State::default()
    }
}

/// Identity of whatever `attr` names.
///
/// A reference to another block becomes that block's address so the value
/// can be correlated with other resources. Anything else is read as a plain
/// string.
pub(crate) fn resolve_identity(
    modules: &Modules,
    block: &Block,
    attr: Option<&Attribute>,
    default: &str,
) -> StringValue {
    if let Some(a) = attr {
        if let Ok(target) = modules.get_referenced_block(a, block) {
            return StringValue::new(target.full_name(), a.metadata());
        }
    }
    attr.as_string_value_or_default(default, block)
}

/// Whether `child.attr` points at `parent`, by reference or by the literal
/// value of `parent.name_attr`.
pub(crate) fn is_child_of(child: &Block, attr: &str, parent: &Block, name_attr: &str) -> bool {
    let Some(link) = child.get_attribute(attr) else {
        return false;
    };
    if link.references_block(parent) {
        return true;
    }
    match (
        link.value.as_str(),
        parent.get_attribute(name_attr).and_then(|a| a.value.as_str()),
    ) {
        (Some(lhs), Some(rhs)) => !lhs.is_empty() && lhs == rhs,
        _ => false,
    }
}

/// Split `children` between `parents`. A child goes to the first parent it
/// links to; children linking to none are returned as orphans.
pub(crate) fn partition_children<'a>(
    parents: &[&Block],
    children: Vec<&'a Block>,
    attr: &str,
    name_attr: &str,
) -> (Vec<Vec<&'a Block>>, Vec<&'a Block>) {
    let mut assigned = vec![Vec::new(); parents.len()];
    let mut orphans = Vec::new();
    for child in children {
        match parents
            .iter()
            .position(|p| is_child_of(child, attr, p, name_attr))
        {
            Some(i) => assigned[i].push(child),
            None => orphans.push(child),
        }
    }
    (assigned, orphans)
}
