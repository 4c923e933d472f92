//! Reading selector lists and snapshots from disk or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use gkd_snapshot::{Snapshot, SnapshotError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to load snapshot '{}': {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        source: SnapshotError,
    },
}

/// One selector taken from a list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorLine {
    /// 1-based line number in the file.
    pub line: usize,
    pub text: String,
}

/// Read `path`, or stdin when `path` is `-`.
pub fn read_text(path: &Path) -> Result<String, LoadError> {
    let result = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        fs::read_to_string(path)
    };
    result.map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Selectors in `text`, one per line; blank lines and `#` comments are skipped.
pub fn parse_selector_lines(text: &str) -> Vec<SelectorLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            Some(SelectorLine {
                line: i + 1,
                text: trimmed.to_string(),
            })
        })
        .collect()
}

pub fn load_selector_file(path: &Path) -> Result<Vec<SelectorLine>, LoadError> {
    read_text(path).map(|text| parse_selector_lines(&text))
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, LoadError> {
    let text = read_text(path)?;
    Snapshot::from_json(&text).map_err(|source| LoadError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}
