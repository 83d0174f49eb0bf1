use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the cfgtree library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("no global configuration has been set")]
    MissingGlobalConfig,

    #[error("global configuration is not of type {expected}")]
    GlobalConfigType { expected: &'static str },
}
