//! Execution results and their transcript rendering

use crate::render;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys that carry an elapsed-time value, checked in order
pub const EXECUTION_TIME_KEYS: &[&str] = &["execution_time", "executionTime", "elapsed", "duration"];

/// Classification of a result's `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Success,
    Error,
    Other,
}

impl ResultStatus {
    pub fn classify(status: &str) -> Self {
        match status {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Other,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Other => "ℹ️",
        }
    }
}

/// A typed execution result.
///
/// Serializes to the map shape `Transcript::log_result` reads; fields it does
/// not know about travel in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExecutionResult {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Default::default()
        }
    }

    pub fn success() -> Self {
        Self::new("success")
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error").with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_execution_time(mut self, time: impl Into<String>) -> Self {
        self.execution_time = Some(time.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn kind(&self) -> ResultStatus {
        ResultStatus::classify(&self.status)
    }
}

/// Render the "Execution Result" composite for a result map
pub(crate) fn render_result(result: &Map<String, Value>) -> serde_json::Result<String> {
    let status = result
        .get("status")
        .map(render::display_value)
        .unwrap_or_else(|| "unknown".to_string());
    let marker = ResultStatus::classify(&status).marker();

    let mut out = render::section("Execution Result", "");
    out.push_str(&render::text(&format!("{marker} **Status:** {status}")));

    if let Some(message) = result.get("message") {
        out.push_str(&render::text(&format!(
            "**Message:** {}",
            render::display_value(message)
        )));
    }

    if let Some(data) = result.get("data") {
        out.push_str(&render::data(data, Some("Result Data"))?);
    }

    if let Some(time) = EXECUTION_TIME_KEYS.iter().find_map(|k| result.get(*k)) {
        out.push_str(&render::text(&format!(
            "**Execution Time:** {}",
            render::display_value(time)
        )));
    }

    Ok(out)
}
