//! transcript: simulated agent runs recorded as markdown transcripts

mod commands;
mod demo;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use transcript_core::TranscriptConfig;

use crate::demo::{Mode, TaskMode};

#[derive(Debug, Parser)]
#[command(name = "transcript")]
#[command(about = "Simulated agent runs with markdown execution logs", version)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for transcript files (overrides transcript.toml)
    #[arg(short, long, global = true, env = "TRANSCRIPT_OUTPUT")]
    output: Option<PathBuf>,

    /// Path to a transcript.toml (default: search current directory and parents)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a single simulated task
    Run {
        /// Task to execute
        #[arg(short, long)]
        task: String,

        /// Reasoning mode
        #[arg(long, value_enum, default_value_t = Mode::Balanced)]
        mode: Mode,

        /// Task execution mode
        #[arg(long, value_enum, default_value_t = TaskMode::Api)]
        task_mode: TaskMode,
    },

    /// Record the sample tasks and example runs
    Examples,

    /// List transcripts in the output directory
    List,

    /// Summarize one transcript; fails if it was never finalized
    Check {
        /// Transcript file
        path: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<TranscriptConfig> {
    let config = match &cli.config {
        Some(path) => TranscriptConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => TranscriptConfig::load()
            .context("Failed to load transcript.toml")?
            .unwrap_or_default(),
    };

    Ok(match &cli.output {
        Some(dir) => config.with_output_dir(dir),
        None => config,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Run {
            task,
            mode,
            task_mode,
        } => commands::run(&config, &task, mode, task_mode),
        Commands::Examples => commands::examples(&config),
        Commands::List => commands::list(&config),
        Commands::Check { path } => commands::check(&path),
    }
}
