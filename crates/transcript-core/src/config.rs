//! Configuration management for transcript.toml

use crate::error::{Result, TranscriptError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "transcript.toml";

/// Where and how transcripts are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Directory that receives transcript files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fence tag used by `log_code_default`
    #[serde(default = "default_code_language")]
    pub default_code_language: String,

    /// File extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_code_language() -> String {
    "python".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_code_language: default_code_language(),
            extension: default_extension(),
        }
    }
}

impl TranscriptConfig {
    /// Load configuration from transcript.toml
    pub fn load() -> Result<Option<Self>> {
        match Self::find_config_path()? {
            Some(path) => Self::load_from(path).map(Some),
            None => Ok(None),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| TranscriptError::io(path, e))?;

        toml::from_str(&content).map_err(|source| TranscriptError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find transcript.toml by searching current directory and parents
    pub fn find_config_path() -> Result<Option<PathBuf>> {
        let cwd = std::env::current_dir().map_err(|e| TranscriptError::io(".", e))?;
        Ok(Self::find_config_path_from(cwd))
    }

    fn find_config_path_from(mut current: PathBuf) -> Option<PathBuf> {
        for _ in 0..10 {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Replace the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
