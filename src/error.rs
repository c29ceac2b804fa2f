//! Error handling for the job matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Record format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Embedding model error: {0}")]
    Embedding(String),

    #[error("Text generation error: {0}")]
    Generation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

/// Convert anyhow errors (surfaced by the embedding model loader) to our error type
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::Embedding(err.to_string())
    }
}

/// Request URLs are stripped so query parameters never reach the logs
impl From<reqwest::Error> for MatcherError {
    fn from(err: reqwest::Error) -> Self {
        MatcherError::Network(err.without_url().to_string())
    }
}
