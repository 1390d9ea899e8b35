//! Log retrieval from the device server report.
//!
//! The report archive is downloaded once per call, the members for the
//! requested [`LogCategory`] are extracted, and every line is parsed into a
//! [`LogEntry`]. Entries keep archive order; nothing is re-sorted.

mod archive;
mod model;
mod parser;
mod severity;

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info};
use ucam_api::{ServerReportMode, VapixClient};

use crate::error::CoreError;

pub use archive::{
    ArchiveMember, extract_matching, extract_member, list_members, member_matches, pattern_matches,
};
pub use model::{LogCategory, LogEntry, LogQuery, LogReport, LogTimestamp};
pub use parser::{parse_content, parse_line, parse_lines};
pub use severity::{Severity, classify_severity};

/// Fetches and parses device logs.
pub struct LogRetriever<'a> {
    client: &'a VapixClient,
}

impl<'a> LogRetriever<'a> {
    pub fn new(client: &'a VapixClient) -> Self {
        Self { client }
    }

    /// Raw server report bytes. Dispatcher failures propagate unchanged.
    pub async fn fetch_archive(&self, mode: ServerReportMode) -> Result<Bytes, CoreError> {
        let bytes = self.client.get_server_report(mode).await?;
        debug!(%mode, bytes = bytes.len(), "fetched server report");
        Ok(bytes)
    }

    /// Member names of the report archive, without parsing content.
    pub async fn list_log_files(&self) -> Result<Vec<String>, CoreError> {
        let archive = self.fetch_archive(ServerReportMode::TarAll).await?;
        list_members(&archive)
    }

    /// Fetch, extract, parse, filter, then truncate.
    pub async fn get_logs(&self, query: LogQuery) -> Result<LogReport, CoreError> {
        let archive = self.fetch_archive(ServerReportMode::TarAll).await?;
        let entries = read_category(&archive, query.category)?;
        let parsed = entries.len();
        let (entries, total_entries) = query.apply(entries);

        let endpoint = self.client.endpoint();
        info!(
            camera = %endpoint.identity(),
            category = %query.category,
            parsed,
            kept = entries.len(),
            "retrieved logs"
        );

        Ok(LogReport {
            camera: endpoint.identity().to_owned(),
            address: endpoint.address().to_owned(),
            category: query.category,
            entries,
            total_entries,
            retrieved_at: Utc::now(),
        })
    }
}

/// Parse every member belonging to `category`.
///
/// A single category with no matching member is `MemberNotFound`. `All`
/// reads system, access and audit members in that order, skipping absent
/// categories, and fails only when none is present.
pub fn read_category(archive: &[u8], category: LogCategory) -> Result<Vec<LogEntry>, CoreError> {
    let mut entries = Vec::new();
    let mut found = false;

    for &part in category.expand() {
        let members = extract_matching(archive, part.member_patterns())?;
        if members.is_empty() {
            if category != LogCategory::All {
                return Err(CoreError::MemberNotFound {
                    name: part.member_patterns().join(" | "),
                });
            }
            debug!(category = %part, "no log members in archive");
            continue;
        }
        found = true;
        for member in members {
            debug!(member = %member.path, "parsing log member");
            entries.extend(parse_content(&member.content));
        }
    }

    if found {
        Ok(entries)
    } else {
        Err(CoreError::MemberNotFound {
            name: "system, access or audit logs".into(),
        })
    }
}
