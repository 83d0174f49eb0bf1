use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),

    #[error("config key not found: {0}")]
    KeyNotFound(String),

    #[error("failed to decode config key '{key}': {source}")]
    DecodeError {
        key: String,
        source: toml::de::Error,
    },

    #[error("config key is empty")]
    InvalidKey,
}

impl ConfigError {
    /// Returns `true` for a missing file or a missing key path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::KeyNotFound(_))
    }
}
