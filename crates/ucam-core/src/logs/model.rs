use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::severity::Severity;

/// Entry timestamp as found in the log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LogTimestamp {
    Parsed(DateTime<FixedOffset>),
    /// The line matched the grammar but the value did not parse.
    Raw(String),
}

/// One parsed log line. `raw` always holds the original line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: Option<LogTimestamp>,
    pub hostname: String,
    pub severity: Severity,
    pub process: Option<String>,
    pub pid: Option<u32>,
    pub message: String,
    pub raw: String,
}

impl LogEntry {
    /// Best-effort entry for a line outside the grammar.
    pub(crate) fn unparsed(raw: &str) -> Self {
        Self {
            timestamp: None,
            hostname: String::new(),
            severity: Severity::Info,
            process: None,
            pid: None,
            message: raw.to_owned(),
            raw: raw.to_owned(),
        }
    }
}

/// Which log files to read from the server report.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogCategory {
    #[default]
    System,
    Access,
    Audit,
    All,
}

impl LogCategory {
    /// Member name patterns for this category, in preference order.
    ///
    /// A member matches when the pattern occurs anywhere in its path,
    /// ignoring case.
    pub fn member_patterns(self) -> &'static [&'static str] {
        match self {
            Self::System => &["syslog", "messages", "kern.log"],
            Self::Access => &["access.log", "httpd/access"],
            Self::Audit => &["audit.log", "audit/audit"],
            Self::All => &[],
        }
    }

    /// Concrete categories read for this request, in output order.
    pub fn expand(self) -> &'static [LogCategory] {
        match self {
            Self::System => &[Self::System],
            Self::Access => &[Self::Access],
            Self::Audit => &[Self::Audit],
            Self::All => &[Self::System, Self::Access, Self::Audit],
        }
    }
}

/// Parameters of a log retrieval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub category: LogCategory,
    pub max_lines: Option<usize>,
    pub min_level: Option<Severity>,
}

impl LogQuery {
    pub fn new(category: LogCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    #[must_use]
    pub fn min_level(mut self, level: Severity) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Filter by minimum level, then keep the first `max_lines`.
    ///
    /// Returns the kept entries and the filtered count before truncation.
    pub fn apply(&self, entries: Vec<LogEntry>) -> (Vec<LogEntry>, usize) {
        let mut kept: Vec<LogEntry> = match self.min_level {
            Some(min) => entries.into_iter().filter(|e| e.severity >= min).collect(),
            None => entries,
        };
        let total = kept.len();
        if let Some(max) = self.max_lines {
            kept.truncate(max);
        }
        (kept, total)
    }
}

/// Parsed entries from one retrieval.
#[derive(Debug, Clone, Serialize)]
pub struct LogReport {
    pub camera: String,
    pub address: String,
    pub category: LogCategory,
    pub entries: Vec<LogEntry>,
    /// Entries that passed the level filter, before truncation.
    pub total_entries: usize,
    pub retrieved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(severity: Severity, message: &str) -> LogEntry {
        LogEntry {
            severity,
            ..LogEntry::unparsed(message)
        }
    }

    #[test]
    fn filter_then_truncate_keeps_order_and_counts() {
        let entries = vec![
            entry(Severity::Info, "a"),
            entry(Severity::Warning, "b"),
            entry(Severity::Debug, "c"),
            entry(Severity::Critical, "d"),
            entry(Severity::Error, "e"),
        ];
        let query = LogQuery::new(LogCategory::System)
            .max_lines(2)
            .min_level(Severity::Warning);

        let (kept, total) = query.apply(entries);
        let messages: Vec<&str> = kept.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "d"]);
        assert_eq!(total, 3);
    }

    #[test]
    fn no_filters_keep_everything() {
        let entries = vec![entry(Severity::Debug, "a"), entry(Severity::Info, "b")];
        let (kept, total) = LogQuery::default().apply(entries);
        assert_eq!(kept.len(), 2);
        assert_eq!(total, 2);
    }

    #[test]
    fn all_expands_in_fixed_order() {
        assert_eq!(
            LogCategory::All.expand(),
            &[LogCategory::System, LogCategory::Access, LogCategory::Audit]
        );
        assert_eq!("AUDIT".parse::<LogCategory>().ok(), Some(LogCategory::Audit));
        assert_eq!(LogCategory::Access.to_string(), "access");
    }
}
