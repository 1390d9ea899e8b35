//! Log retrieval command handlers.

use ucam_core::{Camera, LogCategory, LogEntry, LogQuery, LogReport, LogTimestamp, Severity};

use crate::cli::{GlobalOpts, LogCategoryArg, LogsArgs, LogsCommand, OutputFormat, SeverityArg};
use crate::error::CliError;
use crate::output;

pub async fn handle(camera: &Camera, args: LogsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let retriever = camera.logs();

    match args.command {
        LogsCommand::Show {
            category,
            lines,
            level,
        } => {
            let mut query = LogQuery::new(to_category(category));
            if let Some(lines) = lines {
                query = query.max_lines(lines);
            }
            if let Some(level) = level {
                query = query.min_level(to_severity(level));
            }

            let report = retriever.get_logs(query).await?;
            let out = output::render(global.output, &report, render_report)?;
            output::print_output(&out, global.quiet);

            if matches!(global.output, OutputFormat::Plain) && !global.quiet {
                eprintln!(
                    "{} of {} entries from {} ({})",
                    report.entries.len(),
                    report.total_entries,
                    report.camera,
                    report.category
                );
            }
            Ok(())
        }

        LogsCommand::Files => {
            let files = retriever.list_log_files().await?;
            let out = output::render(global.output, &files, |f| f.join("\n"))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn to_category(arg: LogCategoryArg) -> LogCategory {
    match arg {
        LogCategoryArg::System => LogCategory::System,
        LogCategoryArg::Access => LogCategory::Access,
        LogCategoryArg::Audit => LogCategory::Audit,
        LogCategoryArg::All => LogCategory::All,
    }
}

fn to_severity(arg: SeverityArg) -> Severity {
    match arg {
        SeverityArg::Debug => Severity::Debug,
        SeverityArg::Info => Severity::Info,
        SeverityArg::Warning => Severity::Warning,
        SeverityArg::Error => Severity::Error,
        SeverityArg::Critical => Severity::Critical,
    }
}

fn render_report(report: &LogReport) -> String {
    report
        .entries
        .iter()
        .map(entry_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One entry as `timestamp LEVEL host process[pid]: message`.
/// Lines that never matched the log grammar are printed as-is.
fn entry_line(entry: &LogEntry) -> String {
    let Some(ref timestamp) = entry.timestamp else {
        return entry.raw.clone();
    };
    let timestamp = match timestamp {
        LogTimestamp::Parsed(dt) => dt.to_rfc3339(),
        LogTimestamp::Raw(raw) => raw.clone(),
    };
    let process = match (&entry.process, entry.pid) {
        (Some(name), Some(pid)) => format!("{name}[{pid}]: "),
        (Some(name), None) => format!("{name}: "),
        (None, _) => String::new(),
    };
    let level = entry.severity.to_string();
    format!(
        "{timestamp} {level:<8} {} {process}{}",
        entry.hostname, entry.message
    )
}
