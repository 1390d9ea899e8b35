use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Log severity with a fixed total order:
/// `Debug < Info < Warning < Error < Critical`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    #[strum(to_string = "DEBUG", serialize = "TRACE")]
    Debug,
    #[strum(to_string = "INFO", serialize = "NOTICE")]
    Info,
    #[strum(to_string = "WARNING", serialize = "WARN")]
    Warning,
    #[strum(to_string = "ERROR", serialize = "ERR")]
    Error,
    #[strum(
        to_string = "CRITICAL",
        serialize = "CRIT",
        serialize = "FATAL",
        serialize = "EMERG",
        serialize = "EMERGENCY",
        serialize = "ALERT",
        serialize = "PANIC"
    )]
    Critical,
}

const ERROR_KEYWORDS: &[&str] = &["error", "failed", "failure"];
const WARNING_KEYWORDS: &[&str] = &["warning", "warn"];

/// Decide an entry's severity.
///
/// An explicit level token (canonical name or synonym, any case) wins.
/// Without a recognised token the message is scanned for error keywords,
/// then warning keywords; anything else is `Info`.
pub fn classify_severity(token: &str, message: &str) -> Severity {
    let token = token.trim();
    if !token.is_empty() {
        if let Ok(severity) = token.parse::<Severity>() {
            return severity;
        }
    }

    let message = message.to_ascii_lowercase();
    if ERROR_KEYWORDS.iter().any(|k| message.contains(k)) {
        Severity::Error
    } else if WARNING_KEYWORDS.iter().any(|k| message.contains(k)) {
        Severity::Warning
    } else {
        Severity::Info
    }
}
