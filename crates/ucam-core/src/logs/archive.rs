// ── Server report archive ──
//
// Tar decoding, plain or gzip-compressed (detected by magic bytes). Every
// decoding failure, including a corrupt gzip stream or truncated member
// data, is reported as `MalformedArchive`.

use std::io::{self, Read};

use flate2::read::GzDecoder;
use tar::{Archive, Entry};
use tracing::debug;

use crate::error::CoreError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A decoded archive member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    pub path: String,
    pub content: String,
}

/// Whether a member path names `name`: equal to it or ending in `/name`.
pub fn member_matches(path: &str, name: &str) -> bool {
    let path = path.trim_start_matches("./");
    path == name
        || path
            .strip_suffix(name)
            .is_some_and(|prefix| prefix.ends_with('/'))
}

/// Whether a member path belongs to a log category pattern: the pattern
/// appears anywhere in the path, ignoring case. Rotated files
/// (`messages.1`, `syslog.0`) match their base pattern.
pub fn pattern_matches(path: &str, pattern: &str) -> bool {
    path.to_lowercase().contains(&pattern.to_lowercase())
}

/// Regular-file member paths in archive order.
pub fn list_members(archive: &[u8]) -> Result<Vec<String>, CoreError> {
    let mut names = Vec::new();
    let mut tar = open(archive)?;
    for entry in tar.entries().map_err(malformed)? {
        let entry = entry.map_err(malformed)?;
        if entry.header().entry_type().is_file() {
            names.push(entry_path(&entry)?);
        }
    }
    Ok(names)
}

/// Content of the first member matching `name`, decoded lossily as UTF-8.
pub fn extract_member(archive: &[u8], name: &str) -> Result<String, CoreError> {
    let mut tar = open(archive)?;
    for entry in tar.entries().map_err(malformed)? {
        let mut entry = entry.map_err(malformed)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry_path(&entry)?;
        if member_matches(&path, name) {
            debug!(member = %path, "extracting archive member");
            return read_text(&mut entry, &path);
        }
    }
    Err(CoreError::MemberNotFound {
        name: name.to_owned(),
    })
}

/// Every member matching any of `patterns` (see [`pattern_matches`]), in
/// archive order.
pub fn extract_matching(
    archive: &[u8],
    patterns: &[&str],
) -> Result<Vec<ArchiveMember>, CoreError> {
    let mut members = Vec::new();
    let mut tar = open(archive)?;
    for entry in tar.entries().map_err(malformed)? {
        let mut entry = entry.map_err(malformed)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry_path(&entry)?;
        if patterns.iter().any(|pattern| pattern_matches(&path, pattern)) {
            let content = read_text(&mut entry, &path)?;
            members.push(ArchiveMember { path, content });
        }
    }
    Ok(members)
}

fn open(archive: &[u8]) -> Result<Archive<Box<dyn Read + '_>>, CoreError> {
    if archive.is_empty() {
        return Err(CoreError::MalformedArchive {
            message: "archive is empty".into(),
        });
    }
    let reader: Box<dyn Read + '_> = if archive.starts_with(&GZIP_MAGIC) {
        debug!("server report is gzip-compressed");
        Box::new(GzDecoder::new(archive))
    } else {
        Box::new(archive)
    };
    Ok(Archive::new(reader))
}

fn entry_path<R: Read>(entry: &Entry<'_, R>) -> Result<String, CoreError> {
    let path = entry.path().map_err(malformed)?;
    Ok(path.to_string_lossy().into_owned())
}

fn read_text<R: Read>(entry: &mut Entry<'_, R>, path: &str) -> Result<String, CoreError> {
    let expected = entry.size();
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf).map_err(malformed)?;
    if u64::try_from(buf.len()).unwrap_or(u64::MAX) < expected {
        return Err(CoreError::MalformedArchive {
            message: format!(
                "member '{path}' is truncated ({} of {expected} bytes)",
                buf.len()
            ),
        });
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn malformed(err: io::Error) -> CoreError {
    CoreError::MalformedArchive {
        message: err.to_string(),
    }
}
