use crate::adapter::defaults::Defaults;
use crate::adapter::terraform::partition_children;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::aws::lambda::{Function, Lambda, Permission, Tracing};
use crate::types::{Metadata, StringValue};

const FUNCTION: &str = "aws_lambda_function";

pub(super) fn adapt(modules: &Modules) -> Lambda {
    let blocks = modules.get_resources_by_type(&[FUNCTION]);
    let (permissions, orphans) = partition_children(
        &blocks,
        modules.get_resources_by_type(&["aws_lambda_permission"]),
        "function_name",
        "function_name",
    );

    let mut functions: Vec<Function> = blocks
        .iter()
        .zip(permissions)
        .map(|(block, permissions)| Function {
            metadata: block.metadata(),
            tracing: adapt_tracing(block),
            permissions: permissions.into_iter().map(adapt_permission).collect(),
        })
        .collect();

    functions.extend(orphans.into_iter().map(|permission| Function {
        metadata: Metadata::unmanaged(),
        tracing: Tracing {
            metadata: Metadata::unmanaged(),
            mode: StringValue::defaulted(String::new(), Metadata::unmanaged()),
        },
        permissions: vec![adapt_permission(permission)],
    }));
    Lambda { functions }
}

fn adapt_tracing(block: &Block) -> Tracing {
    let defaults = Defaults::for_resource(FUNCTION).within("tracing_config");
    match block.get_block("tracing_config") {
        Some(config) => Tracing {
            metadata: config.metadata(),
            mode: defaults.string_attr(config, "mode"),
        },
        None => Tracing {
            metadata: block.metadata(),
            mode: StringValue::defaulted(defaults.string("mode").to_string(), block.metadata()),
        },
    }
}

fn adapt_permission(block: &Block) -> Permission {
    Permission {
        metadata: block.metadata(),
        principal: block
            .get_attribute("principal")
            .as_string_value_or_default("", block),
        source_arn: block
            .get_attribute("source_arn")
            .as_string_value_or_default("", block),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Value;
    use crate::providers::aws::lambda::{TRACING_MODE_ACTIVE, TRACING_MODE_PASS_THROUGH};
    use crate::test_util::{assert_adapted_eq, modules};

    #[test]
    fn permissions_attach_to_functions() {
        let m = modules(vec![
            Block::resource(FUNCTION, "example")
                .lines(2, 11)
                .with_attribute("function_name", "lambda_function_name", 4)
                .with_block(
                    Block::nested("tracing_config")
                        .lines(8, 10)
                        .with_attribute("mode", "Active", 9),
                ),
            Block::resource("aws_lambda_permission", "example")
                .lines(13, 19)
                .with_attribute(
                    "function_name",
                    Value::reference("aws_lambda_function.example.function_name"),
                    16,
                )
                .with_attribute("principal", "sns.amazonaws.com", 17)
                .with_attribute("source_arn", Value::reference("aws_sns_topic.default.arn"), 18),
        ]);
        let functions = adapt(&m).functions;
        assert_eq!(functions.len(), 1);
        let f = &functions[0];
        assert_eq!(f.tracing.mode.as_str(), TRACING_MODE_ACTIVE);
        assert_eq!(f.tracing.metadata.range().start_line(), 8);
        assert_eq!(f.tracing.mode.metadata().range().start_line(), 9);

        let expected = Permission {
            metadata: Metadata::test(),
            principal: StringValue::new("sns.amazonaws.com".into(), Metadata::test()),
            source_arn: StringValue::new("aws_sns_topic.default.arn".into(), Metadata::test()),
        };
        assert_adapted_eq(&expected, &f.permissions[0]);
        assert_eq!(f.permissions[0].metadata.range().start_line(), 13);
        assert_eq!(f.permissions[0].source_arn.metadata().range().start_line(), 18);
    }

    #[test]
    fn orphan_permissions_get_unmanaged_functions() {
        let m = modules(vec![
            Block::resource(FUNCTION, "f"),
            Block::resource("aws_lambda_permission", "p").with_attribute("function_name", "elsewhere", 3),
        ]);
        let functions = adapt(&m).functions;
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].tracing.mode.as_str(), TRACING_MODE_PASS_THROUGH);
        assert!(functions[0].permissions.is_empty());
        assert!(functions[1].metadata.is_unmanaged());
        assert_eq!(functions[1].permissions.len(), 1);
    }
}
