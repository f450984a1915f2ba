//! The parsed-tree boundary.
//!
//! Grammar parsing happens elsewhere. This module defines the owned trees a
//! parser hands over (one per source format) and the capability traits the
//! adapters consume, so every format is read through the same accessors.

pub mod cloudformation;
pub mod kubernetes;
pub mod node;
pub mod policy;
pub mod terraform;
mod value;

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::types::{BoolValue, BytesValue, IntValue, Metadata, StringValue, TimeValue};

pub use value::{Reference, ReferenceKind, Value};

/// A named value inside a block.
pub trait ConfigAttribute {
    fn name(&self) -> &str;
    fn metadata(&self) -> Metadata;
    fn value(&self) -> Cow<'_, Value>;
}

/// A block (resource, sub-block or document) that owns attributes.
pub trait ConfigBlock {
    type Attribute: ConfigAttribute;

    fn metadata(&self) -> Metadata;
    fn get_attribute(&self, name: &str) -> Option<&Self::Attribute>;
}

/// Typed accessors over a possibly absent attribute.
///
/// An absent or null attribute yields the default with the parent block's
/// metadata. A malformed one yields the default with the attribute's own
/// metadata, so the finding still points at the offending line.
pub trait AttributeExt {
    fn as_string_value_or_default<B: ConfigBlock + ?Sized>(
        &self,
        default: &str,
        parent: &B,
    ) -> StringValue;

    fn as_bool_value_or_default<B: ConfigBlock + ?Sized>(
        &self,
        default: bool,
        parent: &B,
    ) -> BoolValue;

    fn as_int_value_or_default<B: ConfigBlock + ?Sized>(
        &self,
        default: i64,
        parent: &B,
    ) -> IntValue;

    fn as_bytes_value_or_default<B: ConfigBlock + ?Sized>(
        &self,
        default: &[u8],
        parent: &B,
    ) -> BytesValue;

    /// RFC 3339 timestamp, or "never" when unset.
    fn as_time_value<B: ConfigBlock + ?Sized>(&self, parent: &B) -> TimeValue;

    /// Each element of a list (or a lone scalar) as a string.
    fn as_string_values(&self) -> Vec<StringValue>;

    /// Whether the attribute is set to a non-null value.
    fn is_set(&self) -> bool;
}

impl<A: ConfigAttribute> AttributeExt for Option<&A> {
    fn as_string_value_or_default<B: ConfigBlock + ?Sized>(
        &self,
        default: &str,
        parent: &B,
    ) -> StringValue {
        let Some(attr) = self else {
            return StringValue::defaulted(default.to_string(), parent.metadata());
        };
        let value = attr.value();
        match value.as_ref() {
            Value::Null => StringValue::defaulted(default.to_string(), parent.metadata()),
            Value::Reference(r) => {
                tracing::debug!(attribute = attr.name(), reference = %r, "unresolved reference kept as literal");
                StringValue::new(r.to_string(), attr.metadata())
            }
            other => match other.scalar_to_string() {
                Some(s) => StringValue::new(s, attr.metadata()),
                None => {
                    malformed(attr.name(), "string", other);
                    StringValue::defaulted(default.to_string(), attr.metadata())
                }
            },
        }
    }

    fn as_bool_value_or_default<B: ConfigBlock + ?Sized>(
        &self,
        default: bool,
        parent: &B,
    ) -> BoolValue {
        let Some(attr) = self else {
            return BoolValue::defaulted(default, parent.metadata());
        };
        let value = attr.value();
        match value.as_ref() {
            Value::Null => BoolValue::defaulted(default, parent.metadata()),
            Value::Bool(b) => BoolValue::new(*b, attr.metadata()),
            Value::String(s) if s.eq_ignore_ascii_case("true") => {
                BoolValue::new(true, attr.metadata())
            }
            Value::String(s) if s.eq_ignore_ascii_case("false") => {
                BoolValue::new(false, attr.metadata())
            }
            Value::Reference(r) => {
                tracing::debug!(attribute = attr.name(), reference = %r, "unresolved reference");
                BoolValue::unresolvable(default, attr.metadata())
            }
            other => {
                malformed(attr.name(), "bool", other);
                BoolValue::defaulted(default, attr.metadata())
            }
        }
    }

    fn as_int_value_or_default<B: ConfigBlock + ?Sized>(
        &self,
        default: i64,
        parent: &B,
    ) -> IntValue {
        let Some(attr) = self else {
            return IntValue::defaulted(default, parent.metadata());
        };
        let value = attr.value();
        match value.as_ref() {
            Value::Null => IntValue::defaulted(default, parent.metadata()),
            Value::Number(n) if n.fract() == 0.0 => IntValue::new(*n as i64, attr.metadata()),
            Value::String(s) if s.trim().parse::<i64>().is_ok() => {
                IntValue::new(s.trim().parse().unwrap_or(default), attr.metadata())
            }
            Value::Reference(r) => {
                tracing::debug!(attribute = attr.name(), reference = %r, "unresolved reference");
                IntValue::unresolvable(default, attr.metadata())
            }
            other => {
                malformed(attr.name(), "int", other);
                IntValue::defaulted(default, attr.metadata())
            }
        }
    }

    fn as_bytes_value_or_default<B: ConfigBlock + ?Sized>(
        &self,
        default: &[u8],
        parent: &B,
    ) -> BytesValue {
        let Some(attr) = self else {
            return BytesValue::defaulted(default.to_vec(), parent.metadata());
        };
        let value = attr.value();
        match value.as_ref() {
            Value::Null => BytesValue::defaulted(default.to_vec(), parent.metadata()),
            Value::String(s) => BytesValue::new(s.as_bytes().to_vec(), attr.metadata()),
            Value::Reference(r) => {
                BytesValue::unresolvable(r.to_string().into_bytes(), attr.metadata())
            }
            other => {
                malformed(attr.name(), "bytes", other);
                BytesValue::defaulted(default.to_vec(), attr.metadata())
            }
        }
    }

    fn as_time_value<B: ConfigBlock + ?Sized>(&self, parent: &B) -> TimeValue {
        let Some(attr) = self else {
            return TimeValue::never(parent.metadata());
        };
        let value = attr.value();
        match value.as_ref().as_str().map(DateTime::parse_from_rfc3339) {
            Some(Ok(t)) => TimeValue::new(t.with_timezone(&Utc), attr.metadata()),
            _ => {
                if !value.is_null() {
                    malformed(attr.name(), "timestamp", value.as_ref());
                }
                TimeValue::never(attr.metadata())
            }
        }
    }

    fn as_string_values(&self) -> Vec<StringValue> {
        let Some(attr) = self else {
            return Vec::new();
        };
        let value = attr.value();
        let items: Vec<&Value> = match value.as_ref() {
            Value::Null => return Vec::new(),
            Value::List(items) => items.iter().collect(),
            scalar => vec![scalar],
        };
        items
            .into_iter()
            .filter_map(|v| v.scalar_to_string())
            .map(|s| StringValue::new(s, attr.metadata()))
            .collect()
    }

    fn is_set(&self) -> bool {
        self.map(|a| !a.value().is_null()).unwrap_or(false)
    }
}

fn malformed(name: &str, expected: &str, found: &Value) {
    tracing::debug!(
        attribute = name,
        expected,
        found = found.type_name(),
        "malformed attribute, using default"
    );
}
