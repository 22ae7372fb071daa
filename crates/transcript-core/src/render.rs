//! Markdown rendering for transcript entries
//!
//! Every function returns the complete text of one entry. The transcript
//! writes each rendering with a single append, so an entry is either fully
//! present in the file or absent.

use crate::finite;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Write};

/// Timestamp format used inside transcripts
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format used in transcript filenames
pub const FILE_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const SEPARATOR: &str = "---";

pub fn header<Tz: TimeZone>(script_name: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!(
        "# {script_name} - Execution Log\n\n**Timestamp:** {}\n\n{SEPARATOR}\n\n",
        at.format(DISPLAY_TIME_FORMAT)
    )
}

pub fn footer<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!(
        "\n{SEPARATOR}\n\n*Log generated at {}*\n",
        at.format(DISPLAY_TIME_FORMAT)
    )
}

pub fn section(title: &str, body: &str) -> String {
    let mut out = format!("## {title}\n\n");
    if !body.is_empty() {
        out.push_str(body);
        out.push_str("\n\n");
    }
    out
}

pub fn text(text: &str) -> String {
    format!("{text}\n\n")
}

/// Fenced block; `code` is written verbatim, fence sequences included
pub fn code(code: &str, language: &str) -> String {
    format!("```{language}\n{code}\n```\n\n")
}

/// Pretty JSON block, optionally under a section heading.
///
/// Serialization happens before anything is rendered, so a failure yields no
/// text at all. NaN and infinite floats are rejected rather than written as
/// `null`.
pub fn data<T: Serialize + ?Sized>(data: &T, title: Option<&str>) -> serde_json::Result<String> {
    finite::check(data)?;
    let json = serde_json::to_string_pretty(data)?;

    let mut out = title.map(|t| section(t, "")).unwrap_or_default();
    out.push_str(&code(&json, "json"));
    Ok(out)
}

fn table_row<I, C>(cells: I) -> String
where
    I: IntoIterator<Item = C>,
    C: Display,
{
    let cells: Vec<String> = cells.into_iter().map(|c| c.to_string()).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// Pipe table. Row lengths are not checked against the headers.
pub fn table<H, R, C>(headers: &[H], rows: &[R]) -> String
where
    H: Display,
    R: AsRef<[C]>,
    C: Display,
{
    let mut out = table_row(headers);
    out.push_str(&table_row(headers.iter().map(|_| SEPARATOR)));
    for row in rows {
        out.push_str(&table_row(row.as_ref()));
    }
    out.push('\n');
    out
}

pub fn list<T: Display>(items: &[T], ordered: bool) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = if ordered {
            writeln!(out, "{}. {item}", i + 1)
        } else {
            writeln!(out, "- {item}")
        };
    }
    out.push('\n');
    out
}

/// Strings render raw, everything else as compact JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
