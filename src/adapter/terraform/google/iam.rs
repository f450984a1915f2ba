use crate::adapter::terraform::partition_children;
use crate::parser::terraform::{Attribute, Block, Modules};
use crate::parser::{AttributeExt, ConfigAttribute};
use crate::providers::google::iam::{Binding, Iam, Member, Organization};
use crate::types::{BoolValue, Metadata, StringValue};

const DEFAULT_ACCOUNT_SUFFIXES: &[&str] = &[
    "-compute@developer.gserviceaccount.com",
    "@appspot.gserviceaccount.com",
];

/// Organizations come from `data "google_organization"` blocks. Members and
/// bindings that name an undeclared organization are kept under an
/// unmanaged one.
pub(super) fn adapt(modules: &Modules) -> Iam {
    let orgs = modules.get_data_by_type(&["google_organization"]);
    let (members, orphan_members) = partition_children(
        &orgs,
        modules.get_resources_by_type(&["google_organization_iam_member"]),
        "org_id",
        "organization",
    );
    let (bindings, orphan_bindings) = partition_children(
        &orgs,
        modules.get_resources_by_type(&["google_organization_iam_binding"]),
        "org_id",
        "organization",
    );

    let mut organizations: Vec<Organization> = orgs
        .iter()
        .zip(members.into_iter().zip(bindings))
        .map(|(block, (members, bindings))| Organization {
            metadata: block.metadata(),
            members: members.into_iter().map(|b| adapt_member(modules, b)).collect(),
            bindings: bindings.into_iter().map(|b| adapt_binding(modules, b)).collect(),
        })
        .collect();

    if !orphan_members.is_empty() || !orphan_bindings.is_empty() {
        organizations.push(Organization {
            metadata: Metadata::unmanaged(),
            members: orphan_members
                .into_iter()
                .map(|b| adapt_member(modules, b))
                .collect(),
            bindings: orphan_bindings
                .into_iter()
                .map(|b| adapt_binding(modules, b))
                .collect(),
        });
    }

    Iam { organizations }
}

fn adapt_member(modules: &Modules, block: &Block) -> Member {
    let attr = block.get_attribute("member");
    let member = attr.as_string_value_or_default("", block);
    Member {
        metadata: block.metadata(),
        default_service_account: BoolValue::new(
            is_default_account(modules, attr, &member),
            member.metadata().clone(),
        ),
        member,
        role: block.get_attribute("role").as_string_value_or_default("", block),
    }
}

fn adapt_binding(modules: &Modules, block: &Block) -> Binding {
    let attr = block.get_attribute("members");
    let members = attr.as_string_values();
    let include_default = match attr {
        Some(a) => BoolValue::new(
            references_default_account(modules, a)
                || members.iter().any(|m| has_default_suffix(m.as_str())),
            a.metadata(),
        ),
        None => BoolValue::defaulted(false, block.metadata()),
    };
    Binding {
        metadata: block.metadata(),
        members,
        role: block.get_attribute("role").as_string_value_or_default("", block),
        include_default_service_account: include_default,
    }
}

fn is_default_account(modules: &Modules, attr: Option<&Attribute>, member: &StringValue) -> bool {
    attr.is_some_and(|a| references_default_account(modules, a))
        || has_default_suffix(member.as_str())
}

fn references_default_account(modules: &Modules, attr: &Attribute) -> bool {
    attr.all_references().into_iter().any(|r| {
        r.type_label() == "google_compute_default_service_account"
            && modules.resolve(r).is_some()
    })
}

fn has_default_suffix(member: &str) -> bool {
    DEFAULT_ACCOUNT_SUFFIXES.iter().any(|s| member.ends_with(s))
}
