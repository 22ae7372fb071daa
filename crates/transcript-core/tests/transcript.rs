use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use transcript_core::{ExecutionResult, Transcript, TranscriptInfo};

fn read(transcript: &Transcript) -> String {
    fs::read_to_string(transcript.file_path()).unwrap()
}

/// Body of the transcript after the three header paragraphs
fn body(transcript: &Transcript) -> String {
    let content = read(transcript);
    let (_, rest) = content.split_once("---\n\n").unwrap();
    rest.to_string()
}

/// Contents of every ```json fence, in order
fn json_blocks(content: &str) -> Vec<Value> {
    content
        .split("```json\n")
        .skip(1)
        .map(|block| {
            let (json, _) = block.split_once("\n```\n").unwrap();
            serde_json::from_str(json).unwrap()
        })
        .collect()
}

#[test]
fn test_create_in_missing_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("output");
    let transcript = Transcript::create("demo", &out).unwrap();

    assert!(out.is_dir());
    let name = transcript.file_path().file_name().unwrap().to_str().unwrap().to_string();
    let stamp = name
        .strip_prefix("demo_")
        .and_then(|n| n.strip_suffix(".md"))
        .unwrap();
    let (date, time) = stamp.split_once('_').unwrap();
    assert_eq!(date.len(), 8);
    assert_eq!(time.len(), 6);
    assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()));

    let content = read(&transcript);
    let lines: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "# demo - Execution Log");
    assert!(lines[1].starts_with("**Timestamp:** "));
    assert_eq!(lines[2], "---");
}

#[test]
fn test_table_block() {
    let dir = TempDir::new().unwrap();
    let transcript = Transcript::create("demo", dir.path()).unwrap();
    transcript
        .log_table(&["A", "B"], &[["1", "2"], ["3", "4"]])
        .unwrap();

    let body = body(&transcript);
    let lines: Vec<&str> = body.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines, vec!["| A | B |", "| --- | --- |", "| 1 | 2 |", "| 3 | 4 |"]);
}

#[test]
fn test_lists() {
    let dir = TempDir::new().unwrap();
    let transcript = Transcript::create("demo", dir.path()).unwrap();
    transcript.log_list(&["x", "y"], true).unwrap();
    transcript.log_list(&["x", "y"], false).unwrap();

    assert_eq!(body(&transcript), "1. x\n2. y\n\n- x\n- y\n\n");
}

#[test]
fn test_result_block() {
    let dir = TempDir::new().unwrap();
    let transcript = Transcript::create("demo", dir.path()).unwrap();
    transcript
        .log_result(&json!({"status": "success", "data": {"n": 1}, "execution_time": "1s"}))
        .unwrap();

    let body = body(&transcript);
    assert!(body.starts_with("## Execution Result\n\n✅ **Status:** success\n\n"));
    assert!(body.contains("## Result Data\n\n"));
    assert_eq!(json_blocks(&body), vec![json!({"n": 1})]);
    assert!(body.ends_with("**Execution Time:** 1s\n\n"));
    assert!(!body.contains("**Message:**"));
}

#[test]
fn test_typed_result_block() {
    let dir = TempDir::new().unwrap();
    let transcript = Transcript::create("demo", dir.path()).unwrap();
    let result = ExecutionResult::new("simulated")
        .with_message("This is a demonstration.")
        .with_field("task", json!("list accounts"));
    transcript.log_result(&result).unwrap();

    assert_eq!(
        body(&transcript),
        "## Execution Result\n\nℹ️ **Status:** simulated\n\n**Message:** This is a demonstration.\n\n"
    );
}

#[test]
fn test_data_round_trips() {
    let dir = TempDir::new().unwrap();
    let transcript = Transcript::create("demo", dir.path()).unwrap();
    let values = vec![
        json!({"accounts": [{"id": 1, "name": "Acme Corp", "revenue": 1000000}]}),
        json!([1, "two", null, true, 3.5]),
        json!("a string with ``` inside"),
        json!({"nested": {"deeper": {"unicode": "naïve ✅"}}}),
    ];

    for (i, value) in values.iter().enumerate() {
        let title = format!("Data {i}");
        transcript.log_data(value, Some(title.as_str())).unwrap();
    }
    transcript.log_data(&json!({"untitled": true}), None).unwrap();

    let content = read(&transcript);
    let mut expected = values.clone();
    expected.push(json!({"untitled": true}));
    assert_eq!(json_blocks(&content), expected);
}

#[test]
fn test_full_run_is_complete() {
    let dir = TempDir::new().unwrap();
    let transcript = Transcript::create("basic_usage", dir.path()).unwrap();

    transcript.log_section("Task Execution", "Mode: balanced").unwrap();
    transcript.log_text("**Task:** list accounts").unwrap();
    transcript.log_code("SELECT * FROM accounts;", "sql").unwrap();
    transcript
        .log_result(&ExecutionResult::error("Invalid account ID: -999").with_execution_time("0.5s"))
        .unwrap();

    let partial = TranscriptInfo::read(transcript.file_path()).unwrap();
    assert!(!partial.is_complete);

    transcript.finalize().unwrap();
    transcript.finalize().unwrap();

    let info = TranscriptInfo::read(transcript.file_path()).unwrap();
    assert!(info.is_complete);
    assert_eq!(info.script_name.as_deref(), Some("basic_usage"));
    assert_eq!(info.sections, 2);

    let content = read(&transcript);
    let first_footer = content.find("\n---\n\n*Log generated at ").unwrap();
    let tail = &content[first_footer..];
    let footers: Vec<&str> = tail.lines().filter(|l| l.starts_with("*Log generated at ")).collect();
    assert_eq!(footers.len(), 2);
    assert!(footers.iter().all(|l| l.ends_with('*')));
}
