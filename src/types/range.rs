use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A span of lines inside a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    filename: String,
    start_line: usize,
    end_line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_prefix: Option<String>,
    /// Identity of the filesystem the file was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fs: Option<String>,
}

impl Range {
    pub fn new(filename: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        Self {
            filename: filename.into(),
            start_line,
            end_line: end_line.max(start_line),
            source_prefix: None,
            fs: None,
        }
    }

    pub fn with_source_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.source_prefix = Some(prefix.into());
        self
    }

    pub fn with_fs(mut self, fs: impl Into<String>) -> Self {
        self.fs = Some(fs.into());
        self
    }

    pub(crate) fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Filename including the source prefix, if any.
    pub fn filename(&self) -> String {
        match &self.source_prefix {
            Some(prefix) if !prefix.is_empty() => {
                format!("{}/{}", prefix.trim_end_matches('/'), self.filename)
            }
            _ => self.filename.clone(),
        }
    }

    pub fn local_filename(&self) -> &str {
        &self.filename
    }

    pub fn source_prefix(&self) -> Option<&str> {
        self.source_prefix.as_deref()
    }

    pub fn fs(&self) -> Option<&str> {
        self.fs.as_deref()
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn end_line(&self) -> usize {
        self.end_line
    }

    pub fn is_multi_line(&self) -> bool {
        self.start_line != self.end_line
    }

    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Stable key for the filesystem this range belongs to.
    ///
    /// Empty when no filesystem identity is attached.
    pub fn fs_key(&self) -> String {
        match &self.fs {
            Some(fs) => hex::encode(Sha256::digest(fs.as_bytes())),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_multi_line() {
            write!(f, "{}:{}-{}", self.filename(), self.start_line, self.end_line)
        } else {
            write!(f, "{}:{}", self.filename(), self.start_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_single_and_multi_line() {
        assert_eq!(Range::new("main.tf", 3, 3).to_string(), "main.tf:3");
        assert_eq!(Range::new("main.tf", 3, 9).to_string(), "main.tf:3-9");
    }

    #[test]
    fn prefix_is_joined_into_filename() {
        let range = Range::new("main.tf", 1, 2).with_source_prefix("modules/vpc/");
        assert_eq!(range.filename(), "modules/vpc/main.tf");
        assert_eq!(range.local_filename(), "main.tf");
    }

    #[test]
    fn fs_key_is_stable_and_empty_without_fs() {
        let a = Range::new("a.tf", 1, 1).with_fs("workspace");
        let b = Range::new("b.tf", 7, 9).with_fs("workspace");
        assert_eq!(a.fs_key(), b.fs_key());
        assert_eq!(a.fs_key().len(), 64);
        assert!(Range::new("a.tf", 1, 1).fs_key().is_empty());
        assert_eq!(a.fs(), Some("workspace"));
    }

    #[test]
    fn end_line_never_precedes_start() {
        let range = Range::new("x.yaml", 10, 4);
        assert_eq!(range.end_line(), 10);
        assert!(range.contains_line(10));
    }
}
