//! Canned agent runs
//!
//! Nothing here plans or executes anything. Results are fixed sample data.

use clap::ValueEnum;
use serde_json::json;
use std::fmt;
use transcript_core::ExecutionResult;

/// Reasoning mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Fast,
    Balanced,
    Accurate,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Accurate => "accurate",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskMode {
    Api,
    Web,
    Hybrid,
}

impl TaskMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Web => "web",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for TaskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stand-in agent that reports every task as simulated
#[derive(Debug, Clone)]
pub struct SimulatedAgent {
    pub mode: Mode,
    pub task_mode: TaskMode,
}

impl SimulatedAgent {
    pub fn new(mode: Mode, task_mode: TaskMode) -> Self {
        Self { mode, task_mode }
    }

    /// Settings shown in the configuration table
    pub fn settings(&self) -> Vec<[String; 2]> {
        vec![
            ["Reasoning Mode".to_string(), self.mode.to_string()],
            ["Task Mode".to_string(), self.task_mode.to_string()],
            ["LLM Provider".to_string(), "Simulated".to_string()],
        ]
    }

    pub fn execute(&self, task: &str) -> ExecutionResult {
        ExecutionResult::new("simulated")
            .with_message("This is a demonstration. No agent was invoked.")
            .with_field("task", json!(task))
            .with_field("mode", json!(self.mode.as_str()))
            .with_field("task_mode", json!(self.task_mode.as_str()))
    }
}

/// (category, task) pairs offered as starting points
pub const SAMPLE_TASKS: &[(&str, &str)] = &[
    ("CRM Operations", "get top 5 accounts by revenue from digital sales"),
    ("Data Analysis", "analyze customer sentiment from recent feedback"),
    ("Web Automation", "go to dashboard and extract latest sales figures"),
    ("Hybrid Task", "get top account by revenue from API, then add it to current page"),
    ("File Operations", "read cities.txt and company.txt, find common cities"),
];

/// Titled example runs with their canned results
pub fn sample_runs() -> Vec<(&'static str, ExecutionResult)> {
    let accounts = json!([
        {"id": 1, "name": "Acme Corp", "revenue": 1000000},
        {"id": 2, "name": "TechStart Inc", "revenue": 750000},
        {"id": 3, "name": "Global Solutions", "revenue": 2000000}
    ]);
    let ranked = json!([
        {"id": 3, "name": "Global Solutions", "revenue": 2000000},
        {"id": 1, "name": "Acme Corp", "revenue": 1000000},
        {"id": 2, "name": "TechStart Inc", "revenue": 750000}
    ]);

    vec![
        (
            "Example 1: Simple Task",
            ExecutionResult::success()
                .with_data(accounts)
                .with_execution_time("2.3s")
                .with_field("task", json!("List all accounts in the CRM system")),
        ),
        (
            "Example 2: Task with Parameters",
            ExecutionResult::success()
                .with_data(ranked)
                .with_execution_time("1.8s")
                .with_field("task", json!("Get top 3 accounts by revenue"))
                .with_field(
                    "parameters",
                    json!({"limit": 3, "sort_by": "revenue", "order": "desc"}),
                ),
        ),
        (
            "Example 3: Error Handling",
            ExecutionResult::error("Invalid account ID: -999")
                .with_execution_time("0.5s")
                .with_field("task", json!("Get account with invalid ID: -999"))
                .with_field(
                    "error",
                    json!({
                        "type": "ValidationError",
                        "details": "Account ID must be a positive integer"
                    }),
                ),
        ),
        (
            "Example 4: Multi-Step Task",
            ExecutionResult::success()
                .with_data(json!({
                    "account": {"id": 3, "name": "Global Solutions", "revenue": 2000000},
                    "contacts": [
                        {"name": "John Doe", "email": "john@global.com", "role": "CEO"},
                        {"name": "Jane Smith", "email": "jane@global.com", "role": "CFO"}
                    ]
                }))
                .with_execution_time("2.1s")
                .with_field(
                    "task",
                    json!("Find the highest revenue account and get its contact details"),
                )
                .with_field(
                    "steps",
                    json!([
                        {"step": 1, "action": "Get all accounts sorted by revenue", "status": "completed", "duration": "1.2s"},
                        {"step": 2, "action": "Select top account", "status": "completed", "duration": "0.1s"},
                        {"step": 3, "action": "Fetch contact details for account ID 3", "status": "completed", "duration": "0.8s"}
                    ]),
                ),
        ),
    ]
}

/// Mode comparison rows: mode, time, steps, accuracy
pub fn mode_comparison() -> Vec<[&'static str; 4]> {
    vec![
        ["fast", "1.2s", "3", "good"],
        ["balanced", "2.5s", "5", "very good"],
        ["accurate", "4.8s", "8", "excellent"],
    ]
}
