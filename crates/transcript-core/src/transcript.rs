//! Append-only markdown transcript for one execution run
//!
//! A transcript is bound to a single file, created with its header when the
//! transcript is created. Every logging call renders its entry in full and
//! appends it with one write; nothing is buffered between calls.

use crate::config::TranscriptConfig;
use crate::error::{Result, TranscriptError};
use crate::finite;
use crate::render;
use crate::result::render_result;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Collision suffixes tried before giving up on a filename
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// A markdown execution log on disk
#[derive(Debug)]
pub struct Transcript {
    script_name: String,
    created_at: DateTime<Local>,
    output_dir: PathBuf,
    file_path: PathBuf,
    default_code_language: String,
}

impl Transcript {
    /// Create a transcript in `output_dir`, creating the directory if needed
    pub fn create(script_name: impl Into<String>, output_dir: impl AsRef<Path>) -> Result<Self> {
        let config = TranscriptConfig::default().with_output_dir(output_dir.as_ref());
        Self::create_with(script_name, &config)
    }

    /// Create a transcript in the default `./output` directory
    pub fn create_default(script_name: impl Into<String>) -> Result<Self> {
        Self::create_with(script_name, &TranscriptConfig::default())
    }

    /// Create a transcript using a loaded configuration
    pub fn create_with(script_name: impl Into<String>, config: &TranscriptConfig) -> Result<Self> {
        let script_name = script_name.into();
        let output_dir = config.output_dir.clone();
        fs::create_dir_all(&output_dir).map_err(|e| TranscriptError::io(&output_dir, e))?;

        let created_at = Local::now();
        let stem = format!(
            "{}_{}",
            script_name,
            created_at.format(render::FILE_TIME_FORMAT)
        );
        let (file_path, mut file) = create_unique(&output_dir, &stem, &config.extension)?;

        file.write_all(render::header(&script_name, &created_at).as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| TranscriptError::io(&file_path, e))?;

        info!(script = %script_name, path = %file_path.display(), "Created transcript");

        Ok(Self {
            script_name,
            created_at,
            output_dir,
            file_path,
            default_code_language: config.default_code_language.clone(),
        })
    }

    /// Append a `## title` heading, followed by `body` when it is non-empty
    pub fn log_section(&self, title: &str, body: &str) -> Result<()> {
        self.append(&render::section(title, body))
    }

    /// Append a plain paragraph
    pub fn log_text(&self, text: &str) -> Result<()> {
        self.append(&render::text(text))
    }

    /// Append a fenced code block tagged with `language`
    pub fn log_code(&self, code: &str, language: &str) -> Result<()> {
        self.append(&render::code(code, language))
    }

    /// Append a fenced code block tagged with the configured default language
    pub fn log_code_default(&self, code: &str) -> Result<()> {
        self.log_code(code, &self.default_code_language)
    }

    /// Append `data` as pretty JSON, under a section heading when `title` is set.
    ///
    /// Fails with [`TranscriptError::Serialization`] without writing anything
    /// if `data` cannot be represented as JSON.
    pub fn log_data<T: Serialize + ?Sized>(&self, data: &T, title: Option<&str>) -> Result<()> {
        let block = render::data(data, title)?;
        self.append(&block)
    }

    /// Append a pipe table; every cell is rendered with `Display`
    pub fn log_table<H, R, C>(&self, headers: &[H], rows: &[R]) -> Result<()>
    where
        H: Display,
        R: AsRef<[C]>,
        C: Display,
    {
        self.append(&render::table(headers, rows))
    }

    /// Append a numbered (`ordered`) or bulleted list
    pub fn log_list<T: Display>(&self, items: &[T], ordered: bool) -> Result<()> {
        self.append(&render::list(items, ordered))
    }

    /// Append an "Execution Result" block for anything that serializes to a map.
    ///
    /// Reads `status` (default `unknown`), `message`, `data` and the first
    /// elapsed-time key present. The whole block is written at once.
    pub fn log_result<T: Serialize + ?Sized>(&self, result: &T) -> Result<()> {
        finite::check(result)?;
        let map = match serde_json::to_value(result)? {
            Value::Object(map) => map,
            other => {
                let msg = format!("execution result must be a map, got {other}");
                return Err(TranscriptError::Serialization(serde::ser::Error::custom(msg)));
            }
        };

        self.append(&render_result(&map)?)
    }

    /// Append the closing footer. Each call appends another footer.
    pub fn finalize(&self) -> Result<()> {
        self.append(&render::footer(&Local::now()))?;
        info!(path = %self.file_path.display(), "Finalized transcript");
        Ok(())
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.file_path)
            .map_err(|e| TranscriptError::io(&self.file_path, e))?;

        file.write_all(text.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| TranscriptError::io(&self.file_path, e))?;

        debug!(path = %self.file_path.display(), bytes = text.len(), "Appended entry");
        Ok(())
    }
}

/// Create `<stem>.<ext>`, or `<stem>_N.<ext>` if that name is taken
fn create_unique(dir: &Path, stem: &str, extension: &str) -> Result<(PathBuf, File)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = if attempt == 0 {
            format!("{stem}.{extension}")
        } else {
            format!("{stem}_{attempt}.{extension}")
        };
        let path = dir.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "Transcript name taken, trying next suffix");
            }
            Err(e) => return Err(TranscriptError::io(path, e)),
        }
    }

    Err(TranscriptError::io(
        dir.join(format!("{stem}.{extension}")),
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "no free transcript filename for this second",
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_transcript() -> (Transcript, TempDir) {
        let dir = TempDir::new().unwrap();
        let transcript = Transcript::create("demo", dir.path().join("output")).unwrap();
        (transcript, dir)
    }

    fn read(transcript: &Transcript) -> String {
        fs::read_to_string(transcript.file_path()).unwrap()
    }

    fn header_of(transcript: &Transcript) -> String {
        render::header(transcript.script_name(), &transcript.created_at())
    }

    #[test]
    fn test_create_writes_only_header() {
        let (transcript, dir) = create_test_transcript();

        assert!(dir.path().join("output").is_dir());
        assert_eq!(transcript.output_dir(), dir.path().join("output"));
        assert_eq!(read(&transcript), header_of(&transcript));

        let name = transcript.file_path().file_name().unwrap().to_str().unwrap();
        let expected = format!(
            "demo_{}.md",
            transcript.created_at().format(render::FILE_TIME_FORMAT)
        );
        assert_eq!(name, expected);
    }

    #[test]
    fn test_create_in_existing_dir() {
        let dir = TempDir::new().unwrap();
        Transcript::create("first", dir.path()).unwrap();
        assert!(Transcript::create("second", dir.path()).is_ok());
    }

    #[test]
    fn test_create_fails_when_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = Transcript::create("demo", &blocker).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_same_second_collision_gets_suffix() {
        let dir = TempDir::new().unwrap();
        let (first, _) = create_unique(dir.path(), "demo_20240101_000000", "md").unwrap();
        let (second, _) = create_unique(dir.path(), "demo_20240101_000000", "md").unwrap();

        assert_eq!(first, dir.path().join("demo_20240101_000000.md"));
        assert_eq!(second, dir.path().join("demo_20240101_000000_1.md"));
    }

    #[test]
    fn test_entries_append_in_call_order() {
        let (transcript, _dir) = create_test_transcript();

        transcript.log_section("Setup", "Preparing").unwrap();
        transcript.log_text("hello").unwrap();
        transcript.log_code("print(1)", "python").unwrap();
        transcript.log_list(&["x", "y"], true).unwrap();

        let expected = [
            header_of(&transcript),
            "## Setup\n\nPreparing\n\n".to_string(),
            "hello\n\n".to_string(),
            "```python\nprint(1)\n```\n\n".to_string(),
            "1. x\n2. y\n\n".to_string(),
        ]
        .concat();
        assert_eq!(read(&transcript), expected);
    }

    #[test]
    fn test_log_code_default_is_python() {
        let (transcript, _dir) = create_test_transcript();

        transcript.log_code_default("print(1)").unwrap();
        assert!(read(&transcript).ends_with("```python\nprint(1)\n```\n\n"));
    }

    #[test]
    fn test_log_code_default_uses_config_language() {
        let dir = TempDir::new().unwrap();
        let config = TranscriptConfig {
            default_code_language: "sql".to_string(),
            ..TranscriptConfig::default().with_output_dir(dir.path())
        };
        let transcript = Transcript::create_with("demo", &config).unwrap();

        transcript.log_code_default("SELECT 1;").unwrap();
        assert!(read(&transcript).ends_with("```sql\nSELECT 1;\n```\n\n"));
    }

    #[test]
    fn test_failed_data_writes_nothing() {
        let (transcript, _dir) = create_test_transcript();
        let before = read(&transcript);

        let mut bad = std::collections::HashMap::new();
        bad.insert((1, 2), "tuple key");

        let err = transcript.log_data(&bad, Some("Bad")).unwrap_err();
        assert!(matches!(err, TranscriptError::Serialization(_)));
        assert_eq!(read(&transcript), before);
    }

    #[test]
    fn test_non_finite_data_writes_nothing() {
        let (transcript, _dir) = create_test_transcript();
        let before = read(&transcript);

        let err = transcript
            .log_data(&vec![1.0, f64::INFINITY], None)
            .unwrap_err();
        assert!(matches!(err, TranscriptError::Serialization(_)));

        #[derive(Serialize)]
        struct Scored {
            status: &'static str,
            score: f64,
        }
        let err = transcript
            .log_result(&Scored {
                status: "success",
                score: f64::NAN,
            })
            .unwrap_err();
        assert!(matches!(err, TranscriptError::Serialization(_)));
        assert_eq!(read(&transcript), before);
    }

    #[test]
    fn test_log_result_rejects_non_map() {
        let (transcript, _dir) = create_test_transcript();
        let before = read(&transcript);

        let err = transcript.log_result(&json!(["success"])).unwrap_err();
        assert!(matches!(err, TranscriptError::Serialization(_)));
        assert_eq!(read(&transcript), before);
    }

    #[test]
    fn test_finalize_twice_appends_two_footers() {
        let (transcript, _dir) = create_test_transcript();
        transcript.finalize().unwrap();
        transcript.finalize().unwrap();

        let content = read(&transcript);
        assert_eq!(content.matches("*Log generated at ").count(), 2);
        assert!(content.ends_with("*\n"));
    }

    #[test]
    fn test_append_fails_after_file_removed() {
        let (transcript, _dir) = create_test_transcript();
        fs::remove_file(transcript.file_path()).unwrap();

        let err = transcript.log_text("lost").unwrap_err();
        assert!(err.is_io());
    }
}
