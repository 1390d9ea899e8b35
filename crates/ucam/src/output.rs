//! Output formatting: JSON and plain text.
//!
//! Structured formats serialize the core report types via serde. Plain text
//! is rendered by a per-command closure, one record per line.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render `data` in the chosen format, using `plain_fn` for plain text.
pub fn render<T>(
    format: OutputFormat,
    data: &T,
    plain_fn: impl FnOnce(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
{
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Plain => plain_fn(data),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Plain-text helpers ───────────────────────────────────────────────

/// Leaf value as bare text: strings unquoted, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `path = value` lines.
pub fn assignments<'a>(pairs: impl IntoIterator<Item = (String, &'a Value)>) -> String {
    pairs
        .into_iter()
        .map(|(path, value)| format!("{path} = {}", value_text(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Aligned `label: value` lines for single-record detail views.
pub fn detail(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len() + 1).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            let label = format!("{label}:");
            format!("{label:<width$}  {value}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_owned()
}
