use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ecs {
    pub clusters: Vec<Cluster>,
    pub task_definitions: Vec<TaskDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub metadata: Metadata,
    pub settings: ClusterSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSettings {
    pub metadata: Metadata,
    pub container_insights_enabled: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub metadata: Metadata,
    pub volumes: Vec<Volume>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub metadata: Metadata,
    pub name: StringValue,
    /// Present only for EFS-backed volumes.
    pub efs_volume_configuration: Option<EfsVolumeConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfsVolumeConfiguration {
    pub metadata: Metadata,
    pub transit_encryption_enabled: BoolValue,
}
