use serde::{Deserialize, Serialize};

use crate::parser::policy::{PolicyDocument, PolicyRange};
use crate::types::{BoolValue, IntValue, Metadata, Range, StringValue, TimeValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Iam {
    pub password_policy: PasswordPolicy,
    pub policies: Vec<Policy>,
    pub groups: Vec<Group>,
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub server_certificates: Vec<ServerCertificate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub metadata: Metadata,
    pub reuse_prevention_count: IntValue,
    pub require_lowercase: BoolValue,
    pub require_uppercase: BoolValue,
    pub require_numbers: BoolValue,
    pub require_symbols: BoolValue,
    pub max_age_days: IntValue,
    pub minimum_length: IntValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerCertificate {
    pub metadata: Metadata,
    pub expiration: TimeValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub metadata: Metadata,
    pub name: StringValue,
    pub document: Document,
    pub builtin: BoolValue,
}

/// A parsed policy document plus where it sits in source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: Metadata,
    pub parsed: PolicyDocument,
    /// Statement ranges are already absolute source lines.
    pub is_offset: bool,
    /// The document was assembled from references, so its own metadata is
    /// the best location available.
    pub has_refs: bool,
}

impl Document {
    /// Interchange form for external policy evaluators.
    pub fn to_rego(&self) -> serde_json::Value {
        let mut rego = self.metadata.to_rego();
        if let serde_json::Value::Object(map) = &mut rego {
            map.insert("value".into(), self.parsed.to_json().to_string().into());
        }
        rego
    }

    /// Metadata for a span inside the document.
    ///
    /// Relative ranges are shifted by the document's start line. Each derived
    /// metadata keeps the previous one as its parent.
    pub fn metadata_from_ranges(&self, ranges: &[PolicyRange]) -> Metadata {
        let mut m = self.metadata.clone();
        if self.has_refs {
            return m;
        }
        let base = self.metadata.range();
        let start = if self.is_offset { 0 } else { base.start_line() };
        for r in ranges {
            let mut range = Range::new(
                base.local_filename(),
                start + r.start_line,
                start + r.end_line,
            );
            if let Some(prefix) = base.source_prefix() {
                range = range.with_source_prefix(prefix);
            }
            if let Some(fs) = base.fs() {
                range = range.with_fs(fs);
            }
            let derived = Metadata::new(range, m.reference().to_string());
            m = derived.with_parent(m);
        }
        m
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub metadata: Metadata,
    pub name: StringValue,
    pub users: Vec<User>,
    pub policies: Vec<Policy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub metadata: Metadata,
    pub name: StringValue,
    pub groups: Vec<Group>,
    pub policies: Vec<Policy>,
    pub access_keys: Vec<AccessKey>,
    pub mfa_devices: Vec<MfaDevice>,
    pub last_access: TimeValue,
}

impl User {
    pub fn has_logged_in(&self) -> bool {
        self.last_access.is_resolvable() && !self.last_access.is_never()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MfaDevice {
    pub metadata: Metadata,
    pub is_virtual: BoolValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessKey {
    pub metadata: Metadata,
    pub access_key_id: StringValue,
    pub active: BoolValue,
    pub creation_date: TimeValue,
    pub last_access: TimeValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub metadata: Metadata,
    pub name: StringValue,
    pub policies: Vec<Policy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(is_offset: bool, has_refs: bool) -> Document {
        Document {
            metadata: Metadata::new(Range::new("iam.tf", 10, 30), "aws_iam_policy.p"),
            parsed: PolicyDocument::default(),
            is_offset,
            has_refs,
        }
    }

    #[test]
    fn relative_ranges_are_shifted_by_start_line() {
        let m = document(false, false).metadata_from_ranges(&[PolicyRange {
            start_line: 4,
            end_line: 9,
        }]);
        assert_eq!(m.range().start_line(), 14);
        assert_eq!(m.range().end_line(), 19);
        assert_eq!(m.parent().map(|p| p.range().start_line()), Some(10));
    }

    #[test]
    fn derived_ranges_keep_filesystem_and_prefix() {
        let mut doc = document(false, false);
        doc.metadata = Metadata::new(
            Range::new("iam.tf", 10, 30)
                .with_fs("root")
                .with_source_prefix("modules/iam"),
            "aws_iam_policy.p",
        );
        let m = doc.metadata_from_ranges(&[PolicyRange {
            start_line: 2,
            end_line: 3,
        }]);
        assert_eq!(m.range().fs_key(), doc.metadata.range().fs_key());
        assert!(!m.range().fs_key().is_empty());
        assert_eq!(m.range().filename(), "modules/iam/iam.tf");
        assert_eq!(m.range().start_line(), 12);
    }

    #[test]
    fn offset_ranges_are_used_as_is() {
        let m = document(true, false).metadata_from_ranges(&[PolicyRange {
            start_line: 22,
            end_line: 25,
        }]);
        assert_eq!(m.range().start_line(), 22);
        assert_eq!(m.range().end_line(), 25);
    }

    #[test]
    fn documents_with_references_keep_their_metadata() {
        let doc = document(false, true);
        let m = doc.metadata_from_ranges(&[PolicyRange {
            start_line: 1,
            end_line: 2,
        }]);
        assert_eq!(m, doc.metadata);
    }

    #[test]
    fn rego_form_embeds_document_json() {
        let rego = document(false, false).to_rego();
        assert_eq!(rego["filepath"], "iam.tf");
        assert_eq!(rego["startline"], 10);
        assert!(rego["value"].as_str().unwrap().contains("Statement"));
    }

    #[test]
    fn never_accessed_user_has_not_logged_in() {
        let user = User {
            last_access: TimeValue::never(Metadata::test()),
            ..Default::default()
        };
        assert!(!user.has_logged_in());
    }
}
