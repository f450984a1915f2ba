use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logging::LogConfig;
use crate::rules::policy::Policy;

/// Default configuration file name, looked up next to the sources.
pub const CONFIG_FILE: &str = ".cloudshield.toml";

/// Top-level configuration from `.cloudshield.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Run adapters and rules on the rayon pool. Ignored without the
    /// `parallel` feature.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.logging.validate()?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# cloud-shield configuration

[policy]
# Minimum severity to fail the scan (info, low, medium, high, critical).
fail_on = "high"

# Rules to ignore entirely, by ID or long ID.
# ignore_rules = ["CS-AWS-003", "aws-s3-block-public-acls"]

# Per-rule severity overrides.
# [policy.overrides]
# "aws-lambda-enable-tracing" = "info"

[engine]
# Evaluate adapters and rules in parallel.
parallel = true

[logging]
# Used when RUST_LOG is unset.
level = "warn"
# pretty, compact or json.
format = "compact"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use crate::rules::Severity;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.engine.parallel);
    }

    #[test]
    fn starter_config_parses() {
        let config: Config = toml::from_str(Config::starter_toml()).unwrap();
        assert_eq!(config.policy.fail_on, Severity::High);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn loads_all_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[policy]
fail_on = "medium"
ignore_rules = ["CS-AWS-003"]

[policy.overrides]
"aws-lambda-enable-tracing" = "critical"

[engine]
parallel = false

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.policy.fail_on, Severity::Medium);
        assert!(config.policy.ignore_rules.contains("CS-AWS-003"));
        assert_eq!(
            config.policy.overrides.get("aws-lambda-enable-tracing"),
            Some(&Severity::Critical)
        );
        assert!(!config.engine.parallel);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[policy]\nfail_on = 3").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(crate::error::ScanError::Toml(_))
        ));
    }
}
