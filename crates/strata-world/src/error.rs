use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop world generation.
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid terrain configuration: {0}")]
    Config(String),
    #[error("terrain invariant violated: {0}")]
    InvariantViolation(String),
    #[error("failed to read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("coordinates out of range: {0}")]
    OutOfRange(String),
    #[error("failed to start chunk worker pool: {0}")]
    ThreadPool(String),
}

impl TerrainError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        TerrainError::Config(msg.into())
    }
}
