//! Tracing subscriber setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Result, ScanError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human-readable.
    Pretty,
    /// Single-line.
    #[default]
    Compact,
    /// One JSON object per event, for log aggregation.
    Json,
}

/// The `[logging]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info" or
    /// "cloudshield=debug").
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".into()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Reject a `level` that is not a valid filter directive.
    pub fn validate(&self) -> Result<()> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ScanError::Config(format!("invalid logging level {:?}: {e}", self.level)))
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new(default_level()))
    }
}

/// Install the global subscriber.
///
/// Returns false when a subscriber is already installed, which leaves the
/// existing one in place. Safe to call more than once.
pub fn init(config: &LogConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.filter());
    let installed = match config.format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let config = LogConfig::default().level("debug").format(LogFormat::Json);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn init_is_idempotent() {
        let config = LogConfig::default();
        init(&config);
        assert!(!init(&config));
    }

    #[test]
    fn invalid_level_is_rejected() {
        assert!(LogConfig::default().level("cloudshield=debug").validate().is_ok());
        assert!(matches!(
            LogConfig::default().level("cloudshield=loud").validate(),
            Err(ScanError::Config(_))
        ));
    }

    #[test]
    fn format_names() {
        let config: LogConfig = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "warn");
    }
}
