use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Unresolved reference {reference} from {from}")]
    Reference { reference: String, from: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rule error ({rule_id}): {message}")]
    Rule { rule_id: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

