use crate::adapter::terraform::{partition_children, resolve_identity};
use crate::parser::terraform::{Block, Modules};
use crate::parser::{AttributeExt, ConfigAttribute};
use crate::providers::aws::cloudwatch::{
    Alarm, AlarmDimension, CloudWatch, LogGroup, MetricDataQuery, MetricFilter,
};
use crate::types::{Metadata, StringValue};

pub(super) fn adapt(modules: &Modules) -> CloudWatch {
    CloudWatch {
        log_groups: adapt_log_groups(modules),
        alarms: modules
            .get_resources_by_type(&["aws_cloudwatch_metric_alarm"])
            .into_iter()
            .map(adapt_alarm)
            .collect(),
    }
}

fn adapt_log_groups(modules: &Modules) -> Vec<LogGroup> {
    let groups = modules.get_resources_by_type(&["aws_cloudwatch_log_group"]);
    let filters = modules.get_resources_by_type(&["aws_cloudwatch_log_metric_filter"]);
    let (assigned, orphans) = partition_children(&groups, filters, "log_group_name", "name");

    let mut adapted: Vec<LogGroup> = groups
        .iter()
        .zip(assigned)
        .map(|(block, filters)| LogGroup {
            metric_filters: filters.into_iter().map(adapt_metric_filter).collect(),
            ..adapt_log_group(modules, block)
        })
        .collect();

    // A filter on a group declared elsewhere still has to be checked.
    adapted.extend(orphans.into_iter().map(|filter| LogGroup {
        metadata: Metadata::unmanaged(),
        metric_filters: vec![adapt_metric_filter(filter)],
        ..LogGroup::default()
    }));
    adapted
}

fn adapt_log_group(modules: &Modules, block: &Block) -> LogGroup {
    // The ARN is only known after apply. The block address stands in for it
    // so trails that reference the group correlate with it.
    let arn = match block.get_attribute("arn") {
        Some(attr) => Some(attr).as_string_value_or_default("", block),
        None => StringValue::defaulted(block.full_name(), block.metadata()),
    };
    LogGroup {
        metadata: block.metadata(),
        arn,
        name: block.get_attribute("name").as_string_value_or_default("", block),
        kms_key_id: resolve_identity(modules, block, block.get_attribute("kms_key_id"), ""),
        retention_in_days: block
            .get_attribute("retention_in_days")
            .as_int_value_or_default(0, block),
        metric_filters: Vec::new(),
    }
}

fn adapt_metric_filter(block: &Block) -> MetricFilter {
    MetricFilter {
        metadata: block.metadata(),
        filter_name: block.get_attribute("name").as_string_value_or_default("", block),
        filter_pattern: block
            .get_attribute("pattern")
            .as_string_value_or_default("", block),
    }
}

fn adapt_alarm(block: &Block) -> Alarm {
    let dimensions = match block.get_attribute("dimensions") {
        Some(attr) => attr
            .value
            .as_object()
            .map(|dims| {
                dims.iter()
                    .map(|(name, value)| AlarmDimension {
                        metadata: attr.metadata(),
                        name: StringValue::new(name.clone(), attr.metadata()),
                        value: StringValue::new(
                            value.scalar_to_string().unwrap_or_default(),
                            attr.metadata(),
                        ),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        None => Vec::new(),
    };

    Alarm {
        metadata: block.metadata(),
        alarm_name: block
            .get_attribute("alarm_name")
            .as_string_value_or_default("", block),
        metric_name: block
            .get_attribute("metric_name")
            .as_string_value_or_default("", block),
        dimensions,
        metrics: block
            .get_blocks("metric_query")
            .into_iter()
            .map(|q| MetricDataQuery {
                metadata: q.metadata(),
                id: q.get_attribute("id").as_string_value_or_default("", q),
                expression: q
                    .get_attribute("expression")
                    .as_string_value_or_default("", q),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Value;
    use crate::test_util::modules;

    fn config() -> Modules {
        modules(vec![
            Block::resource("aws_cloudwatch_log_group", "trail")
                .lines(1, 4)
                .with_attribute("name", "cloudtrail", 2)
                .with_attribute("kms_key_id", Value::reference("aws_kms_key.logs.arn"), 3),
            Block::resource("aws_cloudwatch_log_metric_filter", "no_mfa")
                .lines(6, 10)
                .with_attribute("name", "NoMFA", 7)
                .with_attribute("pattern", "{($.eventName=\"ConsoleLogin\")}", 8)
                .with_attribute(
                    "log_group_name",
                    Value::reference("aws_cloudwatch_log_group.trail.name"),
                    9,
                ),
            Block::resource("aws_cloudwatch_log_metric_filter", "stray")
                .lines(12, 15)
                .with_attribute("name", "Stray", 13)
                .with_attribute("log_group_name", "elsewhere", 14),
            Block::resource("aws_cloudwatch_metric_alarm", "no_mfa")
                .lines(17, 30)
                .with_attribute("alarm_name", "no-mfa", 18)
                .with_attribute("metric_name", "NoMFA", 19)
                .with_attribute(
                    "dimensions",
                    Value::object([("InstanceId", Value::from("i-123"))]),
                    20,
                )
                .with_block(
                    Block::nested("metric_query")
                        .lines(22, 25)
                        .with_attribute("id", "e1", 23)
                        .with_attribute("expression", "m1 * 2", 24),
                ),
        ])
    }

    #[test]
    fn filters_attach_to_their_group() {
        let cw = adapt(&config());
        assert_eq!(cw.log_groups.len(), 2);

        let group = &cw.log_groups[0];
        assert_eq!(group.arn.as_str(), "aws_cloudwatch_log_group.trail");
        assert!(group.arn.is_default());
        assert_eq!(group.kms_key_id.as_str(), "aws_kms_key.logs.arn");
        assert_eq!(group.metric_filters.len(), 1);
        assert_eq!(group.metric_filters[0].filter_name.as_str(), "NoMFA");
        assert_eq!(group.metric_filters[0].metadata.range().start_line(), 6);
    }

    #[test]
    fn orphan_filters_get_an_unmanaged_group() {
        let cw = adapt(&config());
        let orphan = &cw.log_groups[1];
        assert!(orphan.metadata.is_unmanaged());
        assert_eq!(orphan.metric_filters[0].filter_name.as_str(), "Stray");
    }

    #[test]
    fn alarms_and_queries() {
        let cw = adapt(&config());
        let alarm = cw.get_alarm_by_metric_name("NoMFA").expect("alarm");
        assert_eq!(alarm.alarm_name.as_str(), "no-mfa");
        assert_eq!(alarm.dimensions.len(), 1);
        assert_eq!(alarm.dimensions[0].value.as_str(), "i-123");
        assert_eq!(alarm.metrics[0].expression.as_str(), "m1 * 2");
        assert_eq!(alarm.metrics[0].metadata.range().start_line(), 22);
    }
}
