use crate::adapter::defaults::Defaults;
use crate::adapter::string_flag;
use crate::parser::cloudformation::{FileContext, Resource};
use crate::parser::{AttributeExt, ConfigBlock};
use crate::providers::aws::ecs::{
    Cluster, ClusterSettings, Ecs, EfsVolumeConfiguration, TaskDefinition, Volume,
};
use crate::types::BoolValue;

pub(super) fn adapt(file: &FileContext) -> Ecs {
    Ecs {
        clusters: file
            .get_resources_by_type("AWS::ECS::Cluster")
            .into_iter()
            .map(adapt_cluster)
            .collect(),
        task_definitions: file
            .get_resources_by_type("AWS::ECS::TaskDefinition")
            .into_iter()
            .map(adapt_task_definition)
            .collect(),
    }
}

fn adapt_cluster(resource: &Resource) -> Cluster {
    let mut settings = ClusterSettings {
        metadata: resource.metadata(),
        container_insights_enabled: BoolValue::defaulted(false, resource.metadata()),
    };
    if let Some(list) = resource.get_property("ClusterSettings") {
        for setting in list.items() {
            let name = setting.get_attribute("Name").as_string_value_or_default("", setting);
            if name.equal_to("containerInsights") {
                settings.metadata = setting.metadata();
                settings.container_insights_enabled = string_flag(
                    setting.get_attribute("Value").as_string_value_or_default("", setting),
                    "enabled",
                );
            }
        }
    }
    Cluster {
        metadata: resource.metadata(),
        settings,
    }
}

fn adapt_task_definition(resource: &Resource) -> TaskDefinition {
    let defaults =
        Defaults::for_resource("AWS::ECS::TaskDefinition").within("EFSVolumeConfiguration");
    let volumes = resource
        .get_property("Volumes")
        .map(|list| {
            list.items()
                .iter()
                .map(|volume| Volume {
                    metadata: volume.metadata(),
                    name: volume.get_attribute("Name").as_string_value_or_default("", volume),
                    efs_volume_configuration: volume.get("EFSVolumeConfiguration").map(|efs| {
                        EfsVolumeConfiguration {
                            metadata: efs.metadata(),
                            transit_encryption_enabled: string_flag(
                                defaults.string_attr(efs, "TransitEncryption"),
                                "ENABLED",
                            ),
                        }
                    }),
                })
                .collect()
        })
        .unwrap_or_default();
    TaskDefinition {
        metadata: resource.metadata(),
        volumes,
    }
}
