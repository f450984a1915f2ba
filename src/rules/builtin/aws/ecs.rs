use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![enable_container_insight(), enable_in_transit_encryption()]
}

fn enable_container_insight() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-007", "aws", "ecs", "enable-container-insight"),
            Severity::Low,
            "ECS clusters should have container insights enabled",
            "Not all metrics and logs may be gathered for containers when Container Insights isn't enabled",
            "Enable Container Insights",
        ),
        |state: &State| {
            let mut results = Results::default();
            for cluster in &state.aws.ecs.clusters {
                let insights = &cluster.settings.container_insights_enabled;
                if insights.is_false() {
                    results.add("Cluster does not have container insights enabled.", insights.metadata());
                } else {
                    results.add_passed(&cluster.metadata);
                }
            }
            results
        },
    )
}

fn enable_in_transit_encryption() -> Rule {
    Rule::new(
        metadata(
            ("CS-AWS-008", "aws", "ecs", "enable-in-transit-encryption"),
            Severity::High,
            "ECS Task Definitions with EFS volumes should use in-transit encryption",
            "Intercepted traffic to and from EFS may lead to data loss",
            "Enable in transit encryption when using efs",
        ),
        |state: &State| {
            let mut results = Results::default();
            for definition in &state.aws.ecs.task_definitions {
                for volume in &definition.volumes {
                    let Some(efs) = &volume.efs_volume_configuration else {
                        continue;
                    };
                    if efs.transit_encryption_enabled.is_false() {
                        results.add(
                            "Task definition includes a volume which does not have in-transit-encryption enabled.",
                            efs.transit_encryption_enabled.metadata(),
                        );
                    } else {
                        results.add_passed(&volume.metadata);
                    }
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::aws::ecs::{EfsVolumeConfiguration, TaskDefinition, Volume};
    use crate::rules::builtin::testing::failures;
    use crate::types::{BoolValue, Metadata};

    fn state(efs: Option<bool>) -> State {
        let mut state = State::default();
        state.aws.ecs.task_definitions.push(TaskDefinition {
            metadata: Metadata::test(),
            volumes: vec![Volume {
                metadata: Metadata::test(),
                efs_volume_configuration: efs.map(|enabled| EfsVolumeConfiguration {
                    metadata: Metadata::test(),
                    transit_encryption_enabled: BoolValue::new(enabled, Metadata::test()),
                }),
                ..Volume::default()
            }],
        });
        state
    }

    #[test]
    fn efs_volume_without_transit_encryption_fails() {
        assert_eq!(failures(&enable_in_transit_encryption(), &state(Some(false))).len(), 1);
        assert!(failures(&enable_in_transit_encryption(), &state(Some(true))).is_empty());
    }

    #[test]
    fn non_efs_volumes_are_ignored() {
        let results = enable_in_transit_encryption().evaluate(&state(None));
        assert!(results.is_empty());
    }
}
