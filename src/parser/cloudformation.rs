//! CloudFormation template tree.

use serde::{Deserialize, Serialize};

use super::node::Node;
use super::ConfigBlock;
use crate::error::{Result, ScanError};
use crate::types::{Metadata, Range};

/// One resource from a template's `Resources` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub logical_id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub range: Range,
    #[serde(default)]
    pub properties: Option<Node>,
}

impl Resource {
    pub fn new(logical_id: &str, resource_type: &str, start: usize, end: usize) -> Self {
        Self {
            logical_id: logical_id.to_string(),
            resource_type: resource_type.to_string(),
            range: Range::new("", start, end),
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: Node) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Property at a dotted path below `Properties`.
    pub fn get_property(&self, path: &str) -> Option<&Node> {
        self.properties.as_ref()?.get(path)
    }
}

impl ConfigBlock for Resource {
    type Attribute = Node;

    fn metadata(&self) -> Metadata {
        Metadata::new(self.range.clone(), self.logical_id.clone())
    }

    fn get_attribute(&self, name: &str) -> Option<&Node> {
        self.get_property(name)
    }
}

/// A parsed template file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileContext {
    pub filepath: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl FileContext {
    /// Build a file context, stamping `filepath` onto every range inside it.
    pub fn new(filepath: &str, resources: Vec<Resource>) -> Self {
        let mut ctx = Self {
            filepath: filepath.to_string(),
            resources,
        };
        ctx.stamp_filename();
        ctx
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut ctx: Self = serde_json::from_str(json).map_err(|e| ScanError::Parse {
            file: "<cloudformation template>".into(),
            message: e.to_string(),
        })?;
        ctx.stamp_filename();
        Ok(ctx)
    }

    fn stamp_filename(&mut self) {
        let filepath = self.filepath.clone();
        for resource in &mut self.resources {
            resource.range = std::mem::take(&mut resource.range).with_filename(&filepath);
            if let Some(props) = &mut resource.properties {
                props.set_filename(&filepath);
            }
        }
    }

    pub fn get_resources_by_type(&self, resource_type: &str) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    pub fn get_resource_by_logical_id(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.logical_id == logical_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::AttributeExt;

    #[test]
    fn properties_resolve_by_dotted_path() {
        let ctx = FileContext::new(
            "template.yaml",
            vec![Resource::new("Cluster", "AWS::ECS::Cluster", 3, 9).with_properties(
                Node::map(
                    "Properties",
                    4,
                    9,
                    vec![Node::list(
                        "ClusterSettings",
                        5,
                        9,
                        vec![Node::map(
                            "",
                            6,
                            7,
                            vec![
                                Node::scalar("Name", "containerInsights", 6),
                                Node::scalar("Value", "enabled", 7),
                            ],
                        )],
                    )],
                ),
            )],
        );
        let cluster = ctx.get_resources_by_type("AWS::ECS::Cluster")[0];
        let value = cluster
            .get_attribute("ClusterSettings.0.Value")
            .as_string_value_or_default("", cluster);
        assert_eq!(value.as_str(), "enabled");
        assert_eq!(value.metadata().range().local_filename(), "template.yaml");
        assert_eq!(cluster.metadata().range().local_filename(), "template.yaml");
        assert!(ctx.get_resource_by_logical_id("Cluster").is_some());
    }

    #[test]
    fn from_json_stamps_filenames() {
        let json = r#"{"filepath": "stack.json", "resources": [{
            "logical_id": "Bucket", "type": "AWS::S3::Bucket",
            "range": {"filename": "", "start_line": 2, "end_line": 4}
        }]}"#;
        let ctx = FileContext::from_json(json).unwrap();
        assert_eq!(ctx.resources[0].range.local_filename(), "stack.json");
    }
}
