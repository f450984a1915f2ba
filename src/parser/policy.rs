//! IAM policy document parsing.
//!
//! Statements keep the line range they occupy in the document text (1-based,
//! relative to the text) so findings can point inside a heredoc or an
//! embedded JSON string.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};

use crate::error::{Result, ScanError};

/// Line span of a statement relative to the start of the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyRange {
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Principals {
    /// `"Principal": "*"`.
    pub all: bool,
    pub aws: Vec<String>,
    pub service: Vec<String>,
    pub federated: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub sid: Option<String>,
    pub effect: String,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
    pub principals: Principals,
    pub range: PolicyRange,
}

impl Statement {
    pub fn is_allow(&self) -> bool {
        self.effect.eq_ignore_ascii_case("allow")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub version: Option<String>,
    pub statements: Vec<Statement>,
}

impl PolicyDocument {
    pub fn parse(text: &str) -> Result<Self> {
        let root: Json = serde_json::from_str(text).map_err(|e| ScanError::Parse {
            file: "<policy document>".into(),
            message: e.to_string(),
        })?;
        let Some(obj) = root.as_object() else {
            return Err(ScanError::Parse {
                file: "<policy document>".into(),
                message: "policy document is not an object".into(),
            });
        };

        let raw_statements: Vec<&Json> = match obj.get("Statement") {
            Some(Json::Array(items)) => items.iter().collect(),
            Some(single @ Json::Object(_)) => vec![single],
            _ => Vec::new(),
        };

        let whole = PolicyRange {
            start_line: 1,
            end_line: text.lines().count().max(1),
        };
        let ranges = statement_ranges(text);
        let ranges_usable = ranges.len() == raw_statements.len();

        let statements = raw_statements
            .into_iter()
            .enumerate()
            .map(|(i, s)| Statement {
                sid: s.get("Sid").and_then(Json::as_str).map(str::to_string),
                effect: s
                    .get("Effect")
                    .and_then(Json::as_str)
                    .unwrap_or("Allow")
                    .to_string(),
                actions: string_or_list(s.get("Action")),
                resources: string_or_list(s.get("Resource")),
                principals: principals(s.get("Principal")),
                range: if ranges_usable { ranges[i] } else { whole },
            })
            .collect();

        Ok(Self {
            version: obj.get("Version").and_then(Json::as_str).map(str::to_string),
            statements,
        })
    }

    pub fn to_json(&self) -> Json {
        let statements: Vec<Json> = self
            .statements
            .iter()
            .map(|s| {
                let mut stmt = serde_json::Map::new();
                if let Some(sid) = &s.sid {
                    stmt.insert("Sid".into(), json!(sid));
                }
                stmt.insert("Effect".into(), json!(s.effect));
                if !s.actions.is_empty() {
                    stmt.insert("Action".into(), json!(s.actions));
                }
                if !s.resources.is_empty() {
                    stmt.insert("Resource".into(), json!(s.resources));
                }
                let p = &s.principals;
                if p.all {
                    stmt.insert("Principal".into(), json!("*"));
                } else if !(p.aws.is_empty() && p.service.is_empty() && p.federated.is_empty()) {
                    let mut map = serde_json::Map::new();
                    for (key, ids) in [("AWS", &p.aws), ("Service", &p.service), ("Federated", &p.federated)] {
                        if !ids.is_empty() {
                            map.insert(key.into(), json!(ids));
                        }
                    }
                    stmt.insert("Principal".into(), Json::Object(map));
                }
                Json::Object(stmt)
            })
            .collect();

        let mut doc = serde_json::Map::new();
        if let Some(v) = &self.version {
            doc.insert("Version".into(), json!(v));
        }
        doc.insert("Statement".into(), Json::Array(statements));
        Json::Object(doc)
    }
}

fn string_or_list(value: Option<&Json>) -> Vec<String> {
    match value {
        Some(Json::String(s)) => vec![s.clone()],
        Some(Json::Array(items)) => items
            .iter()
            .filter_map(Json::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn principals(value: Option<&Json>) -> Principals {
    match value {
        Some(Json::String(s)) if s == "*" => Principals {
            all: true,
            ..Default::default()
        },
        Some(Json::Object(map)) => Principals {
            all: false,
            aws: string_or_list(map.get("AWS")),
            service: string_or_list(map.get("Service")),
            federated: string_or_list(map.get("Federated")),
        },
        _ => Principals::default(),
    }
}

/// Line span of every object directly inside the top-level `Statement`
/// array (or of the lone `Statement` object).
fn statement_ranges(text: &str) -> Vec<PolicyRange> {
    let mut ranges = Vec::new();
    let mut line = 1;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut buf = String::new();
    let mut last_string = String::new();
    let mut awaiting_value = false;
    let mut array_depth: Option<usize> = None;
    let mut open: Option<(usize, usize)> = None;

    for c in text.chars() {
        if c == '\n' {
            line += 1;
        }
        if in_string {
            if escaped {
                escaped = false;
                buf.push(c);
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                last_string = std::mem::take(&mut buf);
            } else {
                buf.push(c);
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                awaiting_value = false;
                buf.clear();
            }
            ':' => awaiting_value = depth == 1 && last_string == "Statement",
            '[' => {
                depth += 1;
                if awaiting_value {
                    array_depth = Some(depth);
                    awaiting_value = false;
                }
            }
            '{' => {
                depth += 1;
                let in_array = array_depth.is_some_and(|d| depth == d + 1);
                if awaiting_value || (open.is_none() && in_array) {
                    open = Some((depth, line));
                }
                awaiting_value = false;
            }
            '}' => {
                if let Some((d, start)) = open {
                    if d == depth {
                        ranges.push(PolicyRange {
                            start_line: start,
                            end_line: line,
                        });
                        open = None;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            ']' => {
                if array_depth == Some(depth) {
                    array_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            c if c.is_whitespace() || c == ',' => {}
            _ => awaiting_value = false,
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = r#"{
  "Version": "2012-10-17",
  "Statement": [
    {
      "Sid": "ReadLogs",
      "Effect": "Allow",
      "Action": ["logs:Get*"],
      "Resource": "arn:aws:logs:*:*:*"
    },
    {
      "Effect": "Allow",
      "Action": "*",
      "Resource": "*",
      "Principal": {"AWS": "arn:aws:iam::123:root"}
    }
  ]
}"#;

    #[test]
    fn parses_statements_with_line_ranges() {
        let doc = PolicyDocument::parse(POLICY).unwrap();
        assert_eq!(doc.version.as_deref(), Some("2012-10-17"));
        assert_eq!(doc.statements.len(), 2);

        let first = &doc.statements[0];
        assert_eq!(first.sid.as_deref(), Some("ReadLogs"));
        assert_eq!(first.actions, vec!["logs:Get*"]);
        assert_eq!(first.range, PolicyRange { start_line: 4, end_line: 9 });

        let second = &doc.statements[1];
        assert_eq!(second.actions, vec!["*"]);
        assert_eq!(second.principals.aws, vec!["arn:aws:iam::123:root"]);
        assert_eq!(second.range, PolicyRange { start_line: 10, end_line: 15 });
    }

    #[test]
    fn single_statement_object() {
        let text = "{\"Statement\": {\n \"Effect\": \"Deny\",\n \"Action\": \"s3:*\"\n}}";
        let doc = PolicyDocument::parse(text).unwrap();
        assert_eq!(doc.statements.len(), 1);
        assert!(!doc.statements[0].is_allow());
        assert_eq!(doc.statements[0].range, PolicyRange { start_line: 1, end_line: 4 });
    }

    #[test]
    fn braces_inside_strings_are_ignored() {
        let text = "{\"Statement\": [\n{\"Sid\": \"a{b}\", \"Action\": \"x\"},\n{\"Action\": \"y\"}\n]}";
        let doc = PolicyDocument::parse(text).unwrap();
        assert_eq!(doc.statements[0].range, PolicyRange { start_line: 2, end_line: 2 });
        assert_eq!(doc.statements[1].range, PolicyRange { start_line: 3, end_line: 3 });
    }

    #[test]
    fn rejects_non_json() {
        assert!(PolicyDocument::parse("not json").is_err());
        assert!(PolicyDocument::parse("[1, 2]").is_err());
    }

    #[test]
    fn json_form_round_trips_statements() {
        let doc = PolicyDocument::parse(POLICY).unwrap();
        let reparsed = PolicyDocument::parse(&doc.to_json().to_string()).unwrap();
        assert_eq!(reparsed.statements[1].actions, doc.statements[1].actions);
        assert_eq!(reparsed.statements[1].principals, doc.statements[1].principals);
    }
}
