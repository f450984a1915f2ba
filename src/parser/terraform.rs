//! Terraform block tree and the reference resolver over it.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{ConfigAttribute, ConfigBlock, Reference, ReferenceKind, Value};
use crate::error::{Result, ScanError};
use crate::types::{Metadata, Range};

const DEFAULT_FILENAME: &str = "main.tf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Resource,
    Data,
    Module,
    /// A sub-block inside a resource, e.g. `vpc_config { ... }`.
    Nested,
}

/// A Terraform block with its attributes and sub-blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    /// Resource type for resources and data sources, block name for nested blocks.
    pub type_label: String,
    #[serde(default)]
    pub name_label: String,
    pub range: Range,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
    pub range: Range,
}

impl Block {
    fn with_kind(kind: BlockKind, type_label: &str, name_label: &str) -> Self {
        Self {
            kind,
            type_label: type_label.to_string(),
            name_label: name_label.to_string(),
            range: Range::new(DEFAULT_FILENAME, 1, 1),
            attributes: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn resource(type_label: &str, name_label: &str) -> Self {
        Self::with_kind(BlockKind::Resource, type_label, name_label)
    }

    pub fn data(type_label: &str, name_label: &str) -> Self {
        Self::with_kind(BlockKind::Data, type_label, name_label)
    }

    pub fn module(name_label: &str) -> Self {
        Self::with_kind(BlockKind::Module, "module", name_label)
    }

    pub fn nested(name: &str) -> Self {
        Self::with_kind(BlockKind::Nested, name, "")
    }

    pub fn lines(mut self, start: usize, end: usize) -> Self {
        self.range = Range::new(self.range.local_filename(), start, end);
        self
    }

    pub fn with_attribute(self, name: &str, value: impl Into<Value>, line: usize) -> Self {
        self.with_attribute_lines(name, value, line, line)
    }

    pub fn with_attribute_lines(
        mut self,
        name: &str,
        value: impl Into<Value>,
        start: usize,
        end: usize,
    ) -> Self {
        self.attributes.push(Attribute {
            name: name.to_string(),
            value: value.into(),
            range: Range::new(self.range.local_filename(), start, end),
        });
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Stamp `filename` onto this block and everything inside it.
    pub fn in_file(mut self, filename: &str) -> Self {
        self.set_filename(filename);
        self
    }

    fn set_filename(&mut self, filename: &str) {
        self.range = std::mem::take(&mut self.range).with_filename(filename);
        for attr in &mut self.attributes {
            attr.range = std::mem::take(&mut attr.range).with_filename(filename);
        }
        self.blocks.iter_mut().for_each(|b| b.set_filename(filename));
    }

    /// Address of the block, e.g. `aws_s3_bucket.logs` or `data.aws_iam_policy_document.p`.
    pub fn full_name(&self) -> String {
        match self.kind {
            BlockKind::Resource => format!("{}.{}", self.type_label, self.name_label),
            BlockKind::Data => format!("data.{}.{}", self.type_label, self.name_label),
            BlockKind::Module => format!("module.{}", self.name_label),
            BlockKind::Nested => self.type_label.clone(),
        }
    }

    pub fn is_resource_type(&self, type_label: &str) -> bool {
        self.kind == BlockKind::Resource && self.type_label == type_label
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// First sub-block with the given name.
    pub fn get_block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.type_label == name)
    }

    /// All sub-blocks with the given name, in source order.
    pub fn get_blocks(&self, name: &str) -> Vec<&Block> {
        self.blocks.iter().filter(|b| b.type_label == name).collect()
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.get_attribute(name).is_some() || self.get_block(name).is_some()
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.range.clone(), self.full_name())
    }

    fn matches(&self, reference: &Reference) -> bool {
        let kind = match reference.kind() {
            ReferenceKind::Resource => BlockKind::Resource,
            ReferenceKind::Data => BlockKind::Data,
            ReferenceKind::Module => BlockKind::Module,
            _ => return false,
        };
        self.kind == kind
            && self.name_label == reference.name_label()
            && (kind == BlockKind::Module || self.type_label == reference.type_label())
    }
}

impl ConfigBlock for Block {
    type Attribute = Attribute;

    fn metadata(&self) -> Metadata {
        Block::metadata(self)
    }

    fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        Block::get_attribute(self, name)
    }
}

impl Attribute {
    pub fn all_references(&self) -> Vec<&Reference> {
        self.value.references()
    }

    /// Whether the attribute refers to `block` (any attribute of it).
    pub fn references_block(&self, block: &Block) -> bool {
        let address = block.full_name();
        self.all_references()
            .iter()
            .any(|r| r.is_block() && r.block_address() == address)
    }

    pub fn is_resource_block_reference(&self, type_label: &str) -> bool {
        self.all_references()
            .iter()
            .any(|r| r.kind() == ReferenceKind::Resource && r.type_label() == type_label)
    }
}

impl ConfigAttribute for Attribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> Metadata {
        Metadata::new(self.range.clone(), self.name.clone())
    }

    fn value(&self) -> Cow<'_, Value> {
        Cow::Borrowed(&self.value)
    }
}

/// One Terraform module: the root module or an instantiated child.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Module {
    pub fn root(blocks: Vec<Block>) -> Self {
        Self {
            path: "root".into(),
            blocks,
        }
    }
}

/// Lookup key for a block inside [`Modules`]. Copy it freely; resolve it with
/// [`Modules::block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    module: usize,
    index: usize,
}

/// Every module of one Terraform configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modules(Vec<Module>);

impl Modules {
    pub fn new(modules: Vec<Module>) -> Self {
        Self(modules)
    }

    /// A configuration made of a single root module.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self(vec![Module::root(blocks)])
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScanError::Parse {
            file: "<terraform modules>".into(),
            message: e.to_string(),
        })
    }

    pub fn modules(&self) -> &[Module] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|m| m.blocks.is_empty())
    }

    /// Top-level blocks of every module, in module then source order.
    pub fn get_blocks(&self) -> impl Iterator<Item = &Block> {
        self.0.iter().flat_map(|m| m.blocks.iter())
    }

    /// Resources whose type is any of `types`. Aliased types share one call.
    pub fn get_resources_by_type(&self, types: &[&str]) -> Vec<&Block> {
        self.get_blocks()
            .filter(|b| b.kind == BlockKind::Resource && types.contains(&b.type_label.as_str()))
            .collect()
    }

    pub fn get_data_by_type(&self, types: &[&str]) -> Vec<&Block> {
        self.get_blocks()
            .filter(|b| b.kind == BlockKind::Data && types.contains(&b.type_label.as_str()))
            .collect()
    }

    pub fn resolve(&self, reference: &Reference) -> Option<BlockHandle> {
        self.resolve_from(reference, None)
    }

    fn resolve_from(&self, reference: &Reference, preferred: Option<usize>) -> Option<BlockHandle> {
        let find = |module: usize| {
            self.0.get(module).and_then(|m| {
                m.blocks
                    .iter()
                    .position(|b| b.matches(reference))
                    .map(|index| BlockHandle { module, index })
            })
        };
        preferred
            .and_then(find)
            .or_else(|| (0..self.0.len()).find_map(find))
    }

    pub fn block(&self, handle: BlockHandle) -> Option<&Block> {
        self.0.get(handle.module)?.blocks.get(handle.index)
    }

    /// Handle of a top-level block borrowed from this configuration.
    pub fn handle_of(&self, block: &Block) -> Option<BlockHandle> {
        self.0.iter().enumerate().find_map(|(module, m)| {
            m.blocks
                .iter()
                .position(|b| std::ptr::eq(b, block))
                .map(|index| BlockHandle { module, index })
        })
    }

    /// The block an attribute of `parent` refers to, searching `parent`'s own
    /// module first.
    pub fn get_referenced_block(&self, attr: &Attribute, parent: &Block) -> Result<&Block> {
        let preferred = self.handle_of(parent).map(|h| h.module);
        attr.all_references()
            .into_iter()
            .filter(|r| r.is_block())
            .find_map(|r| self.resolve_from(r, preferred))
            .and_then(|h| self.block(h))
            .ok_or_else(|| ScanError::Reference {
                reference: attr
                    .value
                    .scalar_to_string()
                    .unwrap_or_else(|| attr.name.clone()),
                from: parent.full_name(),
            })
    }

    /// Resources of `type_label` whose `attribute` refers to `target`.
    pub fn get_referencing_resources(
        &self,
        target: &Block,
        type_label: &str,
        attribute: &str,
    ) -> Vec<&Block> {
        self.get_resources_by_type(&[type_label])
            .into_iter()
            .filter(|b| {
                b.get_attribute(attribute)
                    .is_some_and(|a| a.references_block(target))
            })
            .collect()
    }
}
