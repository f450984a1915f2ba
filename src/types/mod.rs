//! Provenance primitives shared by every layer.
//!
//! Every adapted value carries a [`Metadata`] pointing back at the source
//! range it came from, so a failing rule can name the exact file and lines.

mod metadata;
mod range;
mod values;

pub use metadata::Metadata;
pub use range::Range;
pub use values::{BoolValue, BytesValue, IntValue, StringValue, TimeValue, TypedValue};
