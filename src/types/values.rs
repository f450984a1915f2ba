use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Metadata;

/// A primitive paired with the metadata of where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue<T> {
    value: T,
    metadata: Metadata,
}

pub type StringValue = TypedValue<String>;
pub type BoolValue = TypedValue<bool>;
pub type IntValue = TypedValue<i64>;
pub type TimeValue = TypedValue<DateTime<Utc>>;
pub type BytesValue = TypedValue<Vec<u8>>;

impl<T> TypedValue<T> {
    /// A value written explicitly in source.
    pub fn new(value: T, metadata: Metadata) -> Self {
        Self {
            value,
            metadata: metadata.explicit(),
        }
    }

    /// A value supplied by the adapter because source did not set one.
    pub fn defaulted(value: T, metadata: Metadata) -> Self {
        Self {
            value,
            metadata: metadata.defaulted(),
        }
    }

    /// A value whose source expression could not be evaluated.
    pub fn unresolvable(value: T, metadata: Metadata) -> Self {
        Self {
            value,
            metadata: metadata.unresolvable(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Convert the value, keeping its provenance untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TypedValue<U> {
        TypedValue {
            value: f(self.value),
            metadata: self.metadata,
        }
    }

    pub fn is_resolvable(&self) -> bool {
        self.metadata.is_resolvable()
    }

    pub fn is_explicit(&self) -> bool {
        self.metadata.is_explicit()
    }

    pub fn is_default(&self) -> bool {
        self.metadata.is_default()
    }
}

impl<T: Default> Default for TypedValue<T> {
    fn default() -> Self {
        Self::defaulted(T::default(), Metadata::unmanaged())
    }
}

impl BoolValue {
    /// False for unresolvable values so rules never act on what they cannot see.
    pub fn is_true(&self) -> bool {
        self.is_resolvable() && self.value
    }

    pub fn is_false(&self) -> bool {
        self.is_resolvable() && !self.value
    }
}

impl IntValue {
    pub fn equal_to(&self, other: i64) -> bool {
        self.is_resolvable() && self.value == other
    }

    pub fn less_than(&self, other: i64) -> bool {
        self.is_resolvable() && self.value < other
    }

    pub fn greater_than(&self, other: i64) -> bool {
        self.is_resolvable() && self.value > other
    }
}

impl StringValue {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn equal_to(&self, other: &str) -> bool {
        self.value == other
    }

    pub fn equal_to_ignoring_case(&self, other: &str) -> bool {
        self.value.eq_ignore_ascii_case(other)
    }

    pub fn is_one_of(&self, options: &[&str]) -> bool {
        options.iter().any(|o| self.value == *o)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.value.starts_with(prefix)
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.value.ends_with(suffix)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.value.contains(needle)
    }

    /// Substring match with all whitespace removed from both sides.
    pub fn contains_ignoring_whitespace(&self, needle: &str) -> bool {
        strip_whitespace(&self.value).contains(&strip_whitespace(needle))
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

impl TimeValue {
    /// Sentinel for "never happened".
    pub fn never(metadata: Metadata) -> Self {
        Self::defaulted(DateTime::<Utc>::MIN_UTC, metadata)
    }

    pub fn is_never(&self) -> bool {
        self.value == DateTime::<Utc>::MIN_UTC
    }

    pub fn before(&self, t: DateTime<Utc>) -> bool {
        self.is_resolvable() && !self.is_never() && self.value < t
    }

    pub fn after(&self, t: DateTime<Utc>) -> bool {
        self.is_resolvable() && !self.is_never() && self.value > t
    }
}

impl BytesValue {
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
