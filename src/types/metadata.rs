use serde::{Deserialize, Serialize};

use super::Range;

/// Provenance attached to every adapted value and object.
///
/// Metadata is never mutated once built. Derived metadata (defaulted values,
/// sub-ranges inside a policy document) is produced by the consuming
/// builder methods, which return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    range: Range,
    reference: String,
    is_managed: bool,
    is_explicit: bool,
    #[serde(default)]
    is_default: bool,
    #[serde(default)]
    is_unresolvable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<Box<Metadata>>,
}

impl Metadata {
    /// Metadata for a managed block or attribute found in source.
    pub fn new(range: Range, reference: impl Into<String>) -> Self {
        Self {
            range,
            reference: reference.into(),
            is_managed: true,
            is_explicit: false,
            is_default: false,
            is_unresolvable: false,
            parent: None,
        }
    }

    /// Metadata for objects the scanner synthesised, such as the container
    /// created for an orphaned child resource.
    pub fn unmanaged() -> Self {
        Self {
            range: Range::default(),
            reference: String::new(),
            is_managed: false,
            is_explicit: false,
            is_default: false,
            is_unresolvable: false,
            parent: None,
        }
    }

    /// Synthetic managed metadata for tests.
    pub fn test() -> Self {
        Self {
            range: Range::new("test.test", 123, 123),
            reference: "test".into(),
            is_managed: true,
            is_explicit: false,
            is_default: false,
            is_unresolvable: false,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: Metadata) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub(crate) fn explicit(mut self) -> Self {
        self.is_explicit = true;
        self.is_default = false;
        self
    }

    pub(crate) fn defaulted(mut self) -> Self {
        self.is_explicit = false;
        self.is_default = true;
        self
    }

    pub(crate) fn unresolvable(mut self) -> Self {
        self.is_unresolvable = true;
        self
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn parent(&self) -> Option<&Metadata> {
        self.parent.as_deref()
    }

    pub fn is_managed(&self) -> bool {
        self.is_managed
    }

    pub fn is_unmanaged(&self) -> bool {
        !self.is_managed
    }

    /// True when the value was written in source rather than defaulted.
    pub fn is_explicit(&self) -> bool {
        self.is_explicit
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn is_resolvable(&self) -> bool {
        !self.is_unresolvable
    }

    /// Interchange form used when handing provenance to external evaluators.
    pub fn to_rego(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("filepath".into(), self.range.filename().into());
        map.insert("startline".into(), self.range.start_line().into());
        map.insert("endline".into(), self.range.end_line().into());
        map.insert(
            "sourceprefix".into(),
            self.range.source_prefix().unwrap_or_default().into(),
        );
        map.insert("managed".into(), self.is_managed.into());
        map.insert("explicit".into(), self.is_explicit.into());
        map.insert("fskey".into(), self.range.fs_key().into());
        if let Some(parent) = &self.parent {
            map.insert("parent".into(), parent.to_rego());
        }
        serde_json::Value::Object(map)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::unmanaged()
    }
}
