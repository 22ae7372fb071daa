//! Reading transcripts back from disk
//!
//! A transcript without its footer was never finalized: the run that wrote it
//! stopped early.

use crate::error::{Result, TranscriptError};
use crate::render::DISPLAY_TIME_FORMAT;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const TITLE_SUFFIX: &str = " - Execution Log";
const TIMESTAMP_PREFIX: &str = "**Timestamp:** ";
const FOOTER_PREFIX: &str = "*Log generated at ";

/// Summary of a transcript file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptInfo {
    pub path: PathBuf,
    /// Script name from the title line, if the header is intact
    pub script_name: Option<String>,
    /// Creation time from the header
    pub timestamp: Option<NaiveDateTime>,
    /// Number of `##` headings outside code fences, as a markdown reader sees
    /// them. Code logged verbatim that contains its own fence lines can close
    /// a block early, so such headings are counted the way they render.
    pub sections: usize,
    /// Whether the file ends with a footer
    pub is_complete: bool,
}

impl TranscriptInfo {
    /// Read and summarize a transcript file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| TranscriptError::io(path, e))?;
        Ok(Self::parse(path, &content))
    }

    fn parse(path: &Path, content: &str) -> Self {
        let mut lines = content.lines();

        let script_name = lines
            .next()
            .and_then(|l| l.strip_prefix("# "))
            .and_then(|l| l.strip_suffix(TITLE_SUFFIX))
            .map(str::to_string);

        let timestamp = content
            .lines()
            .take(4)
            .find_map(|l| l.strip_prefix(TIMESTAMP_PREFIX))
            .and_then(|t| NaiveDateTime::parse_from_str(t.trim(), DISPLAY_TIME_FORMAT).ok());

        // Length of the open fence's backtick run
        let mut fence: Option<usize> = None;
        let mut sections = 0;
        for line in content.lines() {
            let ticks = line.len() - line.trim_start_matches('`').len();
            match fence {
                Some(open) => {
                    if ticks >= open && line.trim_end().len() == ticks {
                        fence = None;
                    }
                }
                None if ticks >= 3 => fence = Some(ticks),
                None if line.starts_with("## ") => sections += 1,
                None => {}
            }
        }

        let is_complete = content
            .trim_end()
            .lines()
            .last()
            .is_some_and(|l| l.starts_with(FOOTER_PREFIX) && l.ends_with('*'));

        Self {
            path: path.to_path_buf(),
            script_name,
            timestamp,
            sections,
            is_complete,
        }
    }

    /// Format as a short one-line description
    pub fn short_description(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let when = self
            .timestamp
            .map(|t| t.format(DISPLAY_TIME_FORMAT).to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        let state = if self.is_complete {
            "complete"
        } else {
            "INCOMPLETE"
        };

        format!("{} ({} sections, {}, {})", name, self.sections, when, state)
    }
}

/// List transcripts in `dir` with the given extension, newest first
pub fn list_transcripts(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<TranscriptInfo>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| TranscriptError::io(dir, e))?;

    let mut infos = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == extension) {
            match TranscriptInfo::read(&path) {
                Ok(info) => infos.push(info),
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to read transcript"),
            }
        }
    }

    infos.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.path.cmp(&a.path)));

    Ok(infos)
}
