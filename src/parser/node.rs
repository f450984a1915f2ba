//! Generic document node shared by the CloudFormation and Kubernetes trees.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ConfigAttribute, ConfigBlock, Value};
use crate::types::{Metadata, Range};

/// One node in a YAML/JSON document, with its source range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub name: String,
    pub range: Range,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "content")]
pub enum NodeKind {
    Scalar(Value),
    Map(Vec<Node>),
    List(Vec<Node>),
}

impl Node {
    pub fn scalar(name: impl Into<String>, value: impl Into<Value>, line: usize) -> Self {
        Self {
            name: name.into(),
            range: Range::new("", line, line),
            kind: NodeKind::Scalar(value.into()),
        }
    }

    pub fn map(name: impl Into<String>, start: usize, end: usize, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            range: Range::new("", start, end),
            kind: NodeKind::Map(children),
        }
    }

    pub fn list(name: impl Into<String>, start: usize, end: usize, items: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            range: Range::new("", start, end),
            kind: NodeKind::List(items),
        }
    }

    /// Stamp `filename` onto this node and all descendants.
    pub fn in_file(mut self, filename: &str) -> Self {
        self.set_filename(filename);
        self
    }

    pub(crate) fn set_filename(&mut self, filename: &str) {
        self.range = std::mem::take(&mut self.range).with_filename(filename);
        match &mut self.kind {
            NodeKind::Map(children) | NodeKind::List(children) => {
                children.iter_mut().for_each(|c| c.set_filename(filename))
            }
            NodeKind::Scalar(_) => {}
        }
    }

    /// Look up a dotted path. Numeric segments index into lists.
    pub fn get(&self, path: &str) -> Option<&Node> {
        path.split('.')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    fn child(&self, segment: &str) -> Option<&Node> {
        match &self.kind {
            NodeKind::Map(children) => children.iter().find(|c| c.name == segment),
            NodeKind::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            NodeKind::Scalar(_) => None,
        }
    }

    /// Elements of a list node; empty for anything else.
    pub fn items(&self) -> &[Node] {
        match &self.kind {
            NodeKind::List(items) => items,
            _ => &[],
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, NodeKind::Map(_))
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match &self.kind {
            NodeKind::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Value::as_str)
    }

    pub fn to_value(&self) -> Value {
        match &self.kind {
            NodeKind::Scalar(v) => v.clone(),
            NodeKind::List(items) => Value::List(items.iter().map(Node::to_value).collect()),
            NodeKind::Map(children) => Value::Object(
                children
                    .iter()
                    .map(|c| (c.name.clone(), c.to_value()))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }
}

impl ConfigAttribute for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> Metadata {
        Metadata::new(self.range.clone(), self.name.clone())
    }

    fn value(&self) -> Cow<'_, Value> {
        match &self.kind {
            NodeKind::Scalar(v) => Cow::Borrowed(v),
            _ => Cow::Owned(self.to_value()),
        }
    }
}

impl ConfigBlock for Node {
    type Attribute = Node;

    fn metadata(&self) -> Metadata {
        ConfigAttribute::metadata(self)
    }

    fn get_attribute(&self, name: &str) -> Option<&Node> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::AttributeExt;

    fn doc() -> Node {
        Node::map(
            "spec",
            1,
            8,
            vec![
                Node::scalar("enabled", true, 2),
                Node::list(
                    "ingress",
                    3,
                    8,
                    vec![Node::map(
                        "",
                        4,
                        8,
                        vec![Node::map(
                            "ipBlock",
                            5,
                            6,
                            vec![Node::scalar("cidr", "10.0.0.0/16", 6)],
                        )],
                    )],
                ),
            ],
        )
        .in_file("policy.yaml")
    }

    #[test]
    fn dotted_lookup_through_lists() {
        let d = doc();
        let cidr = d.get("ingress.0.ipBlock.cidr").unwrap();
        assert_eq!(cidr.as_str(), Some("10.0.0.0/16"));
        assert_eq!(cidr.range.local_filename(), "policy.yaml");
        assert!(d.get("ingress.1").is_none());
    }

    #[test]
    fn node_is_a_config_block() {
        let d = doc();
        let v = d.get_attribute("enabled").as_bool_value_or_default(false, &d);
        assert!(v.is_true());
        assert_eq!(v.metadata().range().start_line(), 2);

        let missing = d.get_attribute("nope").as_string_value_or_default("x", &d);
        assert_eq!(missing.as_str(), "x");
        assert_eq!(missing.metadata().range().end_line(), 8);
    }
}
