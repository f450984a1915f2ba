use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// A literal or reference value in a parsed configuration tree.
///
/// Serialized untagged so a parser can hand over plain JSON. References
/// are written as `{"$ref": "aws_kms_key.main.arn"}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Reference(Reference),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// A list of string literals.
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// A reference value, or a plain string if `text` is not a reference.
    pub fn reference(text: &str) -> Self {
        Reference::parse(text)
            .map(Value::Reference)
            .unwrap_or_else(|_| Value::String(text.to_string()))
    }

    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }

    /// Every reference contained in this value, depth first.
    pub fn references(&self) -> Vec<&Reference> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a Reference>) {
        match self {
            Value::Reference(r) => out.push(r),
            Value::List(items) => items.iter().for_each(|v| v.collect_references(out)),
            Value::Object(map) => map.values().for_each(|v| v.collect_references(out)),
            _ => {}
        }
    }

    /// Render a scalar as the string a provider would receive.
    pub(crate) fn scalar_to_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) if n.fract() == 0.0 => Some((*n as i64).to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Reference(r) => Some(r.to_string()),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Reference(_) => "reference",
            Value::Object(_) => "object",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Reference> for Value {
    fn from(r: Reference) -> Self {
        Value::Reference(r)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Resource,
    Data,
    Variable,
    Local,
    Module,
}

/// A reference to another block (or variable) the parser could not
/// evaluate to a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RefRepr", into = "RefRepr")]
pub struct Reference {
    kind: ReferenceKind,
    type_label: String,
    name_label: String,
    attribute: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RefRepr {
    #[serde(rename = "$ref")]
    target: String,
}

impl TryFrom<RefRepr> for Reference {
    type Error = ScanError;

    fn try_from(repr: RefRepr) -> Result<Self> {
        Reference::parse(&repr.target)
    }
}

impl From<Reference> for RefRepr {
    fn from(r: Reference) -> Self {
        RefRepr {
            target: r.to_string(),
        }
    }
}

impl Reference {
    pub fn resource(type_label: impl Into<String>, name_label: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Resource,
            type_label: type_label.into(),
            name_label: name_label.into(),
            attribute: None,
        }
    }

    pub fn data(type_label: impl Into<String>, name_label: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Data,
            ..Self::resource(type_label, name_label)
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Parse a dotted traversal such as `aws_s3_bucket.logs.id`,
    /// `data.aws_iam_policy_document.p.json` or `var.region`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim().trim_start_matches("${").trim_end_matches('}');
        let parts: Vec<&str> = text.split('.').map(strip_index).collect();
        let invalid = || ScanError::Parse {
            file: "<reference>".into(),
            message: format!("'{text}' is not a block reference"),
        };
        if !parts.iter().all(|p| SEGMENT.is_match(p)) {
            return Err(invalid());
        }
        let rest = |from: usize| -> Option<String> {
            (parts.len() > from).then(|| parts[from..].join("."))
        };

        let (kind, type_label, name_label, attribute) = match parts.first().copied() {
            Some("data") if parts.len() >= 3 => {
                (ReferenceKind::Data, parts[1], parts[2], rest(3))
            }
            Some("var") if parts.len() >= 2 => (ReferenceKind::Variable, "", parts[1], rest(2)),
            Some("local") if parts.len() >= 2 => (ReferenceKind::Local, "", parts[1], rest(2)),
            Some("module") if parts.len() >= 2 => (ReferenceKind::Module, "", parts[1], rest(2)),
            Some("data" | "var" | "local" | "module") => return Err(invalid()),
            Some(t) if parts.len() >= 2 && t.contains('_') => {
                (ReferenceKind::Resource, t, parts[1], rest(2))
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            kind,
            type_label: type_label.to_string(),
            name_label: name_label.to_string(),
            attribute,
        })
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    pub fn name_label(&self) -> &str {
        &self.name_label
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Whether this points at a resource or data block.
    pub fn is_block(&self) -> bool {
        matches!(self.kind, ReferenceKind::Resource | ReferenceKind::Data)
    }

    /// The address of the referenced block, without the attribute.
    pub fn block_address(&self) -> String {
        match self.kind {
            ReferenceKind::Resource => format!("{}.{}", self.type_label, self.name_label),
            ReferenceKind::Data => format!("data.{}.{}", self.type_label, self.name_label),
            ReferenceKind::Variable => format!("var.{}", self.name_label),
            ReferenceKind::Local => format!("local.{}", self.name_label),
            ReferenceKind::Module => format!("module.{}", self.name_label),
        }
    }
}

/// One traversal step: an identifier or a splat.
static SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\*|[A-Za-z_][A-Za-z0-9_-]*)$").expect("segment regex is valid")
});

fn strip_index(segment: &str) -> &str {
    match segment.find('[') {
        Some(i) => &segment[..i],
        None => segment,
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.block_address())?;
        if let Some(attr) = &self.attribute {
            write!(f, ".{attr}")?;
        }
        Ok(())
    }
}
