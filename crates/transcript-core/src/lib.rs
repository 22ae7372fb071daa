//! transcript-core: Append-only markdown transcripts for execution runs
//!
//! Provides:
//! - Configuration loading (transcript.toml)
//! - The transcript logger (sections, text, code, data, tables, lists, results)
//! - Execution result types
//! - Inspection of transcripts already on disk

pub mod config;
pub mod error;
mod finite;
pub mod inspect;
pub mod render;
pub mod result;
pub mod transcript;

pub use config::TranscriptConfig;
pub use error::{Result, TranscriptError};
pub use inspect::{list_transcripts, TranscriptInfo};
pub use result::{ExecutionResult, ResultStatus};
pub use transcript::Transcript;
