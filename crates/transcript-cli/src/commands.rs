//! CLI commands implementation

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;
use transcript_core::{
    list_transcripts, ExecutionResult, ResultStatus, Transcript, TranscriptConfig, TranscriptInfo,
};

use crate::demo::{self, Mode, SimulatedAgent, TaskMode};

// ANSI color codes
const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

fn print_status(ok: bool, msg: &str) {
    let icon = if ok {
        format!("{}✓{}", GREEN, RESET)
    } else {
        format!("{}✗{}", RED, RESET)
    };
    println!("  {} {}", icon, msg);
}

/// Run a single simulated task and record it
pub fn run(config: &TranscriptConfig, task: &str, mode: Mode, task_mode: TaskMode) -> Result<()> {
    let (path, result) = record_run(config, task, mode, task_mode)?;

    println!("{}Executing Task:{} {}", BOLD, RESET, task);
    print_status(true, "Task execution simulated");
    println!(
        "\n{}Result:{}\n{}",
        BOLD,
        RESET,
        serde_json::to_string_pretty(&result)?
    );
    println!("\n{}Output saved to: {}{}", DIM, path.display(), RESET);
    Ok(())
}

fn record_run(
    config: &TranscriptConfig,
    task: &str,
    mode: Mode,
    task_mode: TaskMode,
) -> Result<(PathBuf, ExecutionResult)> {
    let transcript = Transcript::create_with("main", config).context("Failed to create transcript")?;

    transcript.log_section(
        "Task Execution",
        &format!("Mode: {}, Task Mode: {}", mode, task_mode),
    )?;
    transcript.log_text(&format!("**Task:** {}", task))?;

    let agent = SimulatedAgent::new(mode, task_mode);
    transcript.log_section("Configuration", "")?;
    transcript.log_table(&["Setting", "Value"], &agent.settings())?;

    let result = agent.execute(task);
    transcript.log_result(&result)?;
    transcript.finalize()?;

    info!(path = %transcript.file_path().display(), "Recorded run");
    Ok((transcript.file_path().to_path_buf(), result))
}

/// Record the sample tasks and canned example runs
pub fn examples(config: &TranscriptConfig) -> Result<()> {
    let path = record_examples(config)?;

    println!("{}Example Tasks{}", BOLD, RESET);
    for (category, task) in demo::SAMPLE_TASKS {
        println!("  {}{}{}: {}", YELLOW, category, RESET, task);
    }
    println!("\n{}To run an example:{}", BOLD, RESET);
    println!("  transcript run --task 'your task here'");
    println!("\n{}Output saved to: {}{}", DIM, path.display(), RESET);
    Ok(())
}

fn record_examples(config: &TranscriptConfig) -> Result<PathBuf> {
    let transcript =
        Transcript::create_with("basic_usage", config).context("Failed to create transcript")?;

    transcript.log_section("Example Tasks", "")?;
    let tasks: Vec<[&str; 2]> = demo::SAMPLE_TASKS.iter().map(|(c, t)| [*c, *t]).collect();
    transcript.log_table(&["Category", "Task"], &tasks)?;

    let runs = demo::sample_runs();
    for (title, result) in &runs {
        transcript.log_section(title, "")?;
        transcript.log_result(result)?;
    }

    transcript.log_section(
        "Example 5: Mode Comparison",
        "Task: Analyze sales trends for Q4 2024",
    )?;
    transcript.log_table(&["Mode", "Time", "Steps", "Accuracy"], &demo::mode_comparison())?;

    let succeeded = runs
        .iter()
        .filter(|(_, r)| r.kind() == ResultStatus::Success)
        .count();
    let failed = runs
        .iter()
        .filter(|(_, r)| r.kind() == ResultStatus::Error)
        .count();

    transcript.log_section("Summary", "")?;
    transcript.log_list(
        &[
            format!("Total examples executed: {}", runs.len() + 1),
            format!("Successful tasks: {}", succeeded),
            format!("Failed tasks: {}", failed),
        ],
        false,
    )?;
    transcript.finalize()?;

    Ok(transcript.file_path().to_path_buf())
}

/// List transcripts in the output directory
pub fn list(config: &TranscriptConfig) -> Result<()> {
    let dir = &config.output_dir;
    if !dir.exists() {
        println!("{}No transcripts yet in {}{}", YELLOW, dir.display(), RESET);
        return Ok(());
    }

    let infos = list_transcripts(dir, &config.extension)
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    println!("{}Transcripts ({}){}", BOLD, infos.len(), RESET);
    for info in &infos {
        print_status(info.is_complete, &info.short_description());
    }
    Ok(())
}

/// Summarize a transcript; an unfinalized transcript is an error
pub fn check(path: &Path) -> Result<()> {
    let info = TranscriptInfo::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!("{}{}{}", BOLD, path.display(), RESET);
    println!(
        "  Script:   {}",
        info.script_name.as_deref().unwrap_or("unknown")
    );
    println!(
        "  Created:  {}",
        info.timestamp
            .map(|t| t.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );
    println!("  Sections: {}", info.sections);

    if !info.is_complete {
        print_status(false, "No footer: the run ended before finalize");
        bail!("{} was never finalized", path.display());
    }

    print_status(true, "Finalized");
    Ok(())
}
