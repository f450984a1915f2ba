use crate::adapter::defaults::Defaults;
use crate::adapter::string_flag;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::aws::ecs::{
    Cluster, ClusterSettings, Ecs, EfsVolumeConfiguration, TaskDefinition, Volume,
};
use crate::types::BoolValue;

pub(super) fn adapt(modules: &Modules) -> Ecs {
    Ecs {
        clusters: modules
            .get_resources_by_type(&["aws_ecs_cluster"])
            .into_iter()
            .map(adapt_cluster)
            .collect(),
        task_definitions: modules
            .get_resources_by_type(&["aws_ecs_task_definition"])
            .into_iter()
            .map(adapt_task_definition)
            .collect(),
    }
}

fn adapt_cluster(block: &Block) -> Cluster {
    let mut settings = ClusterSettings {
        metadata: block.metadata(),
        container_insights_enabled: BoolValue::defaulted(false, block.metadata()),
    };
    for setting in block.get_blocks("setting") {
        let name = setting.get_attribute("name").as_string_value_or_default("", setting);
        if name.equal_to("containerInsights") {
            settings.metadata = setting.metadata();
            let value = setting
                .get_attribute("value")
                .as_string_value_or_default("", setting);
            settings.container_insights_enabled = string_flag(value, "enabled");
        }
    }
    Cluster {
        metadata: block.metadata(),
        settings,
    }
}

fn adapt_task_definition(block: &Block) -> TaskDefinition {
    let defaults = Defaults::for_resource("aws_ecs_task_definition").within("efs_volume_configuration");
    TaskDefinition {
        metadata: block.metadata(),
        volumes: block
            .get_blocks("volume")
            .into_iter()
            .map(|volume| Volume {
                metadata: volume.metadata(),
                name: volume.get_attribute("name").as_string_value_or_default("", volume),
                efs_volume_configuration: volume.get_block("efs_volume_configuration").map(
                    |efs| EfsVolumeConfiguration {
                        metadata: efs.metadata(),
                        transit_encryption_enabled: string_flag(
                            defaults.string_attr(efs, "transit_encryption"),
                            "ENABLED",
                        ),
                    },
                ),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::modules;

    #[test]
    fn container_insights_setting() {
        let m = modules(vec![Block::resource("aws_ecs_cluster", "c").lines(1, 7).with_block(
            Block::nested("setting")
                .lines(3, 6)
                .with_attribute("name", "containerInsights", 4)
                .with_attribute("value", "enabled", 5),
        )]);
        let cluster = &adapt(&m).clusters[0];
        assert!(cluster.settings.container_insights_enabled.is_true());
        assert_eq!(cluster.settings.metadata.range().start_line(), 3);
        assert_eq!(
            cluster.settings.container_insights_enabled.metadata().range().start_line(),
            5
        );
    }

    #[test]
    fn efs_volumes_default_to_no_transit_encryption() {
        let m = modules(vec![Block::resource("aws_ecs_task_definition", "td")
            .with_block(
                Block::nested("volume")
                    .with_attribute("name", "service-storage", 3)
                    .with_block(Block::nested("efs_volume_configuration").lines(4, 6)),
            )
            .with_block(Block::nested("volume").with_attribute("name", "scratch", 9))]);
        let td = &adapt(&m).task_definitions[0];
        assert_eq!(td.volumes.len(), 2);
        let efs = td.volumes[0].efs_volume_configuration.as_ref().expect("efs");
        assert!(efs.transit_encryption_enabled.is_false());
        assert!(efs.transit_encryption_enabled.is_default());
        assert!(td.volumes[1].efs_volume_configuration.is_none());
    }
}
