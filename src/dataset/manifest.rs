//! Manifest Reader
//!
//! A manifest is the per-split data list: one `path,class_name` pair per line,
//! optionally preceded by a header line starting with `file_path` or `file_name`.
//!
//! ```text
//! file_path,class_name
//! images/0001.jpg,class_a
//! images/0002.jpg,class_b,extra columns are ignored
//! ```
//!
//! Lines with fewer than two comma-separated fields are dropped without
//! complaint. Listed sample paths are never checked for existence.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::error::{DistributionError, Result};

/// Leading tokens that mark the first line as a column header
pub const HEADER_TOKENS: [&str; 2] = ["file_path", "file_name"];

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A single labeled sample listed in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Sample path exactly as listed (trimmed)
    pub path: String,
    /// Class label (trimmed)
    pub class_name: String,
}

impl ManifestRecord {
    pub fn new(path: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            class_name: class_name.into(),
        }
    }
}

/// Parsed contents of one manifest file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Valid records in file order
    pub records: Vec<ManifestRecord>,
    /// Whether the first line was recognised as a header and discarded
    pub had_header: bool,
    /// Number of physical lines read, header included
    pub lines_read: usize,
    /// Data lines dropped for having fewer than two fields
    pub skipped_lines: usize,
}

impl Manifest {
    /// Number of valid records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no line produced a valid record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check whether a line is a manifest header
pub fn is_header(line: &str) -> bool {
    let line = line.trim();
    HEADER_TOKENS.iter().any(|token| line.starts_with(token))
}

/// Parse one data line into a record.
///
/// Returns `None` when the line splits into fewer than two fields.
pub fn parse_line(line: &str) -> Option<ManifestRecord> {
    let mut fields = line.split(',');
    let path = fields.next()?;
    let class_name = fields.next()?;

    Some(ManifestRecord::new(path.trim(), class_name.trim()))
}

/// Parse manifest text from any buffered reader
pub fn parse_manifest<R: BufRead>(reader: R) -> std::io::Result<Manifest> {
    let mut manifest = Manifest::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        manifest.lines_read += 1;

        let text = if idx == 0 {
            let text = line.trim_start_matches(BYTE_ORDER_MARK);
            if is_header(text) {
                manifest.had_header = true;
                continue;
            }
            text
        } else {
            line.as_str()
        };

        match parse_line(text) {
            Some(record) => manifest.records.push(record),
            None => manifest.skipped_lines += 1,
        }
    }

    Ok(manifest)
}

/// Read a manifest from disk.
///
/// Returns `Ok(None)` when there is no file at `path`; the caller is expected
/// to skip the split rather than abort. Files that exist but cannot be read
/// (permissions, invalid UTF-8) are reported as [`DistributionError::ManifestRead`].
pub fn read_manifest(path: &Path) -> Result<Option<Manifest>> {
    if !path.is_file() {
        debug!("No manifest at {}", path.display());
        return Ok(None);
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(DistributionError::ManifestRead(
                path.to_path_buf(),
                e.to_string(),
            ))
        }
    };

    let manifest = parse_manifest(BufReader::new(file))
        .map_err(|e| DistributionError::ManifestRead(path.to_path_buf(), e.to_string()))?;

    debug!(
        "Parsed {}: {} records from {} lines ({} skipped, header: {})",
        path.display(),
        manifest.len(),
        manifest.lines_read,
        manifest.skipped_lines,
        manifest.had_header
    );

    Ok(Some(manifest))
}
