//! Kubernetes manifest tree.

use serde::{Deserialize, Serialize};

use super::node::Node;
use super::ConfigBlock;
use crate::error::{Result, ScanError};
use crate::types::Metadata;

/// One manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub path: String,
    pub root: Node,
}

impl Manifest {
    pub fn new(path: &str, root: Node) -> Self {
        Self {
            path: path.to_string(),
            root: root.in_file(path),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json).map_err(|e| ScanError::Parse {
            file: "<kubernetes manifest>".into(),
            message: e.to_string(),
        })?;
        let Manifest { path, root } = manifest;
        Ok(Self::new(&path, root))
    }

    pub fn kind(&self) -> Option<&str> {
        self.root.get("kind").and_then(Node::as_str)
    }

    pub fn api_version(&self) -> Option<&str> {
        self.root.get("apiVersion").and_then(Node::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get("metadata.name").and_then(Node::as_str)
    }

    pub fn get(&self, path: &str) -> Option<&Node> {
        self.root.get(path)
    }
}

impl ConfigBlock for Manifest {
    type Attribute = Node;

    fn metadata(&self) -> Metadata {
        Metadata::new(
            self.root.range.clone(),
            format!("{}/{}", self.kind().unwrap_or("Unknown"), self.name().unwrap_or("")),
        )
    }

    fn get_attribute(&self, name: &str) -> Option<&Node> {
        self.root.get(name)
    }
}
