//! Errors from transcript operations

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, TranscriptError>;

/// Errors from transcript operations.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl TranscriptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures of the underlying filesystem
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
