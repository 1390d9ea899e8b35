// ── Syslog line parser ──
//
// Grammar:
//   TIMESTAMP WS HOSTNAME WS "[" WS? LEVEL WS? "]" WS [PROCESS["[" PID "]"] ":" WS] MESSAGE
// Lines outside the grammar are kept as INFO entries carrying the raw line.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;

use super::model::{LogEntry, LogTimestamp};
use super::severity::classify_severity;

static SYSLOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<timestamp>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:[+-]\d{2}:\d{2}|Z)?)",
        r"\s+(?P<hostname>\S+)",
        r"\s+\[\s*(?P<level>\w*)\s*\]",
        r"\s+(?:(?P<process>[\w.\-/]+)(?:\[(?P<pid>\d+)\])?:\s*)?",
        r"(?P<message>.*)$",
    ))
    .expect("syslog line pattern is valid")
});

/// Parse one log line. Never fails.
pub fn parse_line(raw: &str) -> LogEntry {
    let raw = raw.trim_end_matches(['\r', '\n']);
    let Some(caps) = SYSLOG_LINE.captures(raw) else {
        return LogEntry::unparsed(raw);
    };

    let field = |name: &str| caps.name(name).map_or("", |m| m.as_str());
    let message = field("message").to_owned();

    LogEntry {
        timestamp: Some(parse_timestamp(field("timestamp"))),
        hostname: field("hostname").to_owned(),
        severity: classify_severity(field("level"), &message),
        process: caps.name("process").map(|m| m.as_str().to_owned()),
        pid: caps.name("pid").and_then(|m| m.as_str().parse().ok()),
        message,
        raw: raw.to_owned(),
    }
}

/// Parse every line in `lines`, one entry per line.
pub fn parse_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<LogEntry> {
    lines.into_iter().map(parse_line).collect()
}

/// Parse a log file's content. Blank lines are not records and are skipped.
pub fn parse_content(content: &str) -> Vec<LogEntry> {
    parse_lines(content.lines().filter(|line| !line.trim().is_empty()))
}

/// Timestamps without an offset are taken as UTC.
fn parse_timestamp(value: &str) -> LogTimestamp {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return LogTimestamp::Parsed(ts);
    }
    match NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => LogTimestamp::Parsed(naive.and_utc().fixed_offset()),
        Err(_) => LogTimestamp::Raw(value.to_owned()),
    }
}
