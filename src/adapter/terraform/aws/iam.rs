use crate::adapter::defaults::Defaults;
use crate::adapter::string_flag;
use crate::adapter::terraform::partition_children;
use crate::parser::policy::{PolicyDocument, PolicyRange, Principals, Statement};
use crate::parser::terraform::{Attribute, Block, Modules};
use crate::parser::{AttributeExt, ConfigAttribute, Value};
use crate::providers::aws::iam::{
    AccessKey, Document, Group, Iam, PasswordPolicy, Policy, Role, ServerCertificate, User,
};
use crate::types::{BoolValue, Metadata, StringValue, TimeValue};

const AWS_MANAGED_POLICY_PREFIX: &str = "arn:aws:iam::aws:policy/";

pub(super) fn adapt(modules: &Modules) -> Iam {
    Iam {
        password_policy: adapt_password_policy(modules),
        policies: modules
            .get_resources_by_type(&["aws_iam_policy"])
            .into_iter()
            .map(|b| adapt_policy(modules, b))
            .collect(),
        groups: adapt_groups(modules),
        users: adapt_users(modules),
        roles: adapt_roles(modules),
        server_certificates: modules
            .get_resources_by_type(&["aws_iam_server_certificate"])
            .into_iter()
            .map(|b| ServerCertificate {
                metadata: b.metadata(),
                expiration: b.get_attribute("expiration").as_time_value(b),
            })
            .collect(),
    }
}

fn adapt_password_policy(modules: &Modules) -> PasswordPolicy {
    const POLICY: &str = "aws_iam_account_password_policy";
    let Some(block) = modules.get_resources_by_type(&[POLICY]).into_iter().next() else {
        return PasswordPolicy::default();
    };
    let defaults = Defaults::for_resource(POLICY);
    PasswordPolicy {
        metadata: block.metadata(),
        reuse_prevention_count: defaults.int_attr(block, "password_reuse_prevention"),
        require_lowercase: defaults.bool_attr(block, "require_lowercase_characters"),
        require_uppercase: defaults.bool_attr(block, "require_uppercase_characters"),
        require_numbers: defaults.bool_attr(block, "require_numbers"),
        require_symbols: defaults.bool_attr(block, "require_symbols"),
        max_age_days: defaults.int_attr(block, "max_password_age"),
        minimum_length: defaults.int_attr(block, "minimum_password_length"),
    }
}

/// A standalone policy resource or an inline policy: anything with a
/// `name` and a `policy` document.
fn adapt_policy(modules: &Modules, block: &Block) -> Policy {
    Policy {
        metadata: block.metadata(),
        name: block.get_attribute("name").as_string_value_or_default("", block),
        document: adapt_document(modules, block),
        builtin: BoolValue::defaulted(false, block.metadata()),
    }
}

fn adapt_document(modules: &Modules, block: &Block) -> Document {
    let Some(attr) = block.get_attribute("policy") else {
        return Document {
            metadata: block.metadata(),
            ..Document::default()
        };
    };

    match &attr.value {
        Value::String(text) => Document {
            metadata: attr.metadata(),
            parsed: parse_or_empty(text, attr),
            is_offset: false,
            has_refs: false,
        },
        // Statement lines inside an encoded object say nothing about source
        // lines, so findings point at the attribute itself.
        Value::Object(_) => Document {
            metadata: attr.metadata(),
            parsed: serde_json::to_string(&attr.value)
                .map(|text| parse_or_empty(&text, attr))
                .unwrap_or_default(),
            is_offset: false,
            has_refs: true,
        },
        Value::Reference(_) => match modules.get_referenced_block(attr, block) {
            Ok(target) if target.type_label == "aws_iam_policy_document" => Document {
                metadata: target.metadata(),
                parsed: document_from_data_block(target),
                is_offset: true,
                has_refs: false,
            },
            _ => Document {
                metadata: attr.metadata(),
                parsed: PolicyDocument::default(),
                is_offset: false,
                has_refs: true,
            },
        },
        _ => Document {
            metadata: attr.metadata(),
            ..Document::default()
        },
    }
}

fn parse_or_empty(text: &str, attr: &Attribute) -> PolicyDocument {
    PolicyDocument::parse(text).unwrap_or_else(|e| {
        tracing::debug!(attribute = %attr.name, error = %e, "unparseable policy document");
        PolicyDocument::default()
    })
}

/// Statements of a `data "aws_iam_policy_document"` block. Their ranges are
/// absolute source lines.
fn document_from_data_block(block: &Block) -> PolicyDocument {
    let strings = |b: &Block, name: &str| -> Vec<String> {
        b.get_attribute(name)
            .as_string_values()
            .into_iter()
            .map(StringValue::into_value)
            .collect()
    };

    let statements = block
        .get_blocks("statement")
        .into_iter()
        .map(|stmt| {
            let mut principals = Principals::default();
            for p in stmt.get_blocks("principals") {
                let kind = p.get_attribute("type").as_string_value_or_default("", p);
                let ids = strings(p, "identifiers");
                match kind.as_str() {
                    "AWS" if ids.iter().any(|i| i == "*") => principals.all = true,
                    "AWS" => principals.aws.extend(ids),
                    "Service" => principals.service.extend(ids),
                    "Federated" => principals.federated.extend(ids),
                    "*" => principals.all = true,
                    _ => {}
                }
            }
            Statement {
                sid: stmt
                    .get_attribute("sid")
                    .and_then(|a| a.value.scalar_to_string()),
                effect: stmt
                    .get_attribute("effect")
                    .as_string_value_or_default("Allow", stmt)
                    .into_value(),
                actions: strings(stmt, "actions"),
                resources: strings(stmt, "resources"),
                principals,
                range: PolicyRange {
                    start_line: stmt.range.start_line(),
                    end_line: stmt.range.end_line(),
                },
            }
        })
        .collect();

    PolicyDocument {
        version: block
            .get_attribute("version")
            .and_then(|a| a.value.scalar_to_string())
            .or_else(|| Some("2012-10-17".into())),
        statements,
    }
}

/// How policies attach to one kind of IAM principal.
struct Attachments {
    inline: &'static str,
    attachment: &'static str,
    link: &'static str,
}

const ROLE: Attachments = Attachments {
    inline: "aws_iam_role_policy",
    attachment: "aws_iam_role_policy_attachment",
    link: "role",
};

const USER: Attachments = Attachments {
    inline: "aws_iam_user_policy",
    attachment: "aws_iam_user_policy_attachment",
    link: "user",
};

const GROUP: Attachments = Attachments {
    inline: "aws_iam_group_policy",
    attachment: "aws_iam_group_policy_attachment",
    link: "group",
};

/// Policies of every parent, plus the policies whose parent is not declared.
fn attached_policies(
    modules: &Modules,
    parents: &[&Block],
    kind: &Attachments,
) -> (Vec<Vec<Policy>>, Vec<Policy>) {
    let (inline, inline_orphans) = partition_children(
        parents,
        modules.get_resources_by_type(&[kind.inline]),
        kind.link,
        "name",
    );
    let (attached, attached_orphans) = partition_children(
        parents,
        modules.get_resources_by_type(&[kind.attachment]),
        kind.link,
        "name",
    );

    let per_parent = inline
        .into_iter()
        .zip(attached)
        .map(|(inline, attached)| {
            inline
                .into_iter()
                .map(|b| adapt_policy(modules, b))
                .chain(attached.into_iter().map(|b| adapt_attachment(modules, b)))
                .collect()
        })
        .collect();

    let orphans = inline_orphans
        .into_iter()
        .map(|b| adapt_policy(modules, b))
        .chain(
            attached_orphans
                .into_iter()
                .map(|b| adapt_attachment(modules, b)),
        )
        .collect();

    (per_parent, orphans)
}

/// The policy an attachment points at: a declared `aws_iam_policy`, or a
/// managed policy known only by ARN.
fn adapt_attachment(modules: &Modules, block: &Block) -> Policy {
    let arn = block.get_attribute("policy_arn");
    if let Some(attr) = arn {
        if let Ok(target) = modules.get_referenced_block(attr, block) {
            if target.is_resource_type("aws_iam_policy") {
                return adapt_policy(modules, target);
            }
        }
    }
    let name = arn.as_string_value_or_default("", block);
    Policy {
        metadata: block.metadata(),
        builtin: BoolValue::new(
            name.starts_with(AWS_MANAGED_POLICY_PREFIX),
            name.metadata().clone(),
        ),
        name,
        document: Document {
            metadata: block.metadata(),
            ..Document::default()
        },
    }
}

fn adapt_roles(modules: &Modules) -> Vec<Role> {
    let blocks = modules.get_resources_by_type(&["aws_iam_role"]);
    let (policies, orphans) = attached_policies(modules, &blocks, &ROLE);

    let mut roles: Vec<Role> = blocks
        .iter()
        .zip(policies)
        .map(|(block, attached)| {
            let inline = block
                .get_blocks("inline_policy")
                .into_iter()
                .map(|b| adapt_policy(modules, b));
            Role {
                metadata: block.metadata(),
                name: block.get_attribute("name").as_string_value_or_default("", *block),
                policies: inline.chain(attached).collect(),
            }
        })
        .collect();

    roles.extend(orphans.into_iter().map(|policy| Role {
        metadata: Metadata::unmanaged(),
        name: StringValue::defaulted(String::new(), Metadata::unmanaged()),
        policies: vec![policy],
    }));
    roles
}

fn adapt_users(modules: &Modules) -> Vec<User> {
    let blocks = modules.get_resources_by_type(&["aws_iam_user"]);
    let (policies, orphan_policies) = attached_policies(modules, &blocks, &USER);
    let (keys, orphan_keys) = partition_children(
        &blocks,
        modules.get_resources_by_type(&["aws_iam_access_key"]),
        "user",
        "name",
    );

    let mut users: Vec<User> = blocks
        .iter()
        .zip(policies)
        .zip(keys)
        .map(|((block, policies), keys)| User {
            metadata: block.metadata(),
            name: block.get_attribute("name").as_string_value_or_default("", *block),
            policies,
            access_keys: keys.into_iter().map(adapt_access_key).collect(),
            last_access: TimeValue::never(block.metadata()),
            ..User::default()
        })
        .collect();

    let unmanaged = |policies, access_keys| User {
        metadata: Metadata::unmanaged(),
        policies,
        access_keys,
        last_access: TimeValue::never(Metadata::unmanaged()),
        ..User::default()
    };
    users.extend(orphan_policies.into_iter().map(|p| unmanaged(vec![p], Vec::new())));
    users.extend(
        orphan_keys
            .into_iter()
            .map(|k| unmanaged(Vec::new(), vec![adapt_access_key(k)])),
    );
    users
}

fn adapt_access_key(block: &Block) -> AccessKey {
    let status = Defaults::for_resource("aws_iam_access_key").string_attr(block, "status");
    AccessKey {
        metadata: block.metadata(),
        // Only known after apply.
        access_key_id: StringValue::defaulted(String::new(), block.metadata()),
        active: string_flag(status, "Active"),
        creation_date: TimeValue::never(block.metadata()),
        last_access: TimeValue::never(block.metadata()),
    }
}

fn adapt_groups(modules: &Modules) -> Vec<Group> {
    let blocks = modules.get_resources_by_type(&["aws_iam_group"]);
    let (policies, orphans) = attached_policies(modules, &blocks, &GROUP);

    let mut groups: Vec<Group> = blocks
        .iter()
        .zip(policies)
        .map(|(block, policies)| Group {
            metadata: block.metadata(),
            name: block.get_attribute("name").as_string_value_or_default("", *block),
            users: Vec::new(),
            policies,
        })
        .collect();

    groups.extend(orphans.into_iter().map(|policy| Group {
        metadata: Metadata::unmanaged(),
        policies: vec![policy],
        ..Group::default()
    }));
    groups
}
