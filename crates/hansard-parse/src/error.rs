use hansard_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("payload matches neither the structured nor the full-content format")]
    UnknownFormat,

    #[error("{0} already set for this session")]
    AlreadySet(&'static str),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
