//! Asset collection: one manifest entry per file under a category directory.
//!
//! The walk is recursive and depth-first. A file is recorded unless its name
//! starts with `.` or appears in the exclusion list; the check is on the
//! filename only, so `.DS_Store` is dropped at any depth.
//!
//! ```text
//! images/                     File { path: "cover.png" ... type: "image" }
//! ├── cover.png          →    File { path: "icons/app.png" ... type: "image" }
//! ├── .DS_Store               (skipped)
//! └── icons/
//!     └── app.png
//! ```
//!
//! Paths are relative to the category directory and keep the platform's
//! separator. Timestamps are the file's modification time in UTC, truncated
//! to whole seconds.

use crate::types::ManifestEntry;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Format used for the `time:` field.
pub const TIME_FORMAT: &str = "%Y.%m.%d %H.%M.%S";

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Category directory does not exist: {0}")]
    MissingDirectory(PathBuf),
    #[error("Category path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Filters and ordering applied to one collection pass.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Filenames to skip.
    pub exclude: Vec<String>,
    /// Sort entries by path instead of keeping file system order.
    pub sort: bool,
    /// Do not descend into directories whose name starts with `.`.
    pub skip_hidden_directories: bool,
}

/// Walk `base` and produce one entry per included file, tagged with `label`.
///
/// Fails with [`CollectError::MissingDirectory`] if `base` does not exist;
/// callers decide whether that is fatal.
pub fn generate_deployment_data(
    label: &str,
    base: &Path,
    options: &CollectOptions,
) -> Result<Vec<ManifestEntry>, CollectError> {
    if !base.exists() {
        return Err(CollectError::MissingDirectory(base.to_path_buf()));
    }
    if !base.is_dir() {
        return Err(CollectError::NotADirectory(base.to_path_buf()));
    }

    let walker = WalkDir::new(base)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| {
            !(options.skip_hidden_directories
                && e.depth() > 0
                && e.file_type().is_dir()
                && is_hidden(e))
        });

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_hidden(&entry) || options.exclude.iter().any(|x| x.as_str() == name) {
            continue;
        }

        // Symlinks are reported with their target's metadata; links to
        // directories are skipped entirely.
        let metadata = if entry.path_is_symlink() {
            fs::metadata(entry.path())?
        } else {
            entry.metadata()?
        };
        if metadata.is_dir() {
            continue;
        }

        let rel_path = entry.path().strip_prefix(base).unwrap_or(entry.path());
        entries.push(ManifestEntry {
            path: rel_path.to_string_lossy().to_string(),
            time: format_timestamp(metadata.modified()?),
            kind: label.to_string(),
        });
    }

    if options.sort {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
    }

    tracing::debug!(
        label,
        base = %base.display(),
        count = entries.len(),
        "collected category"
    );
    Ok(entries)
}

/// Format a modification time as UTC `YYYY.MM.DD HH.MM.SS`.
pub fn format_timestamp(time: SystemTime) -> String {
    let utc: DateTime<Utc> = time.into();
    utc.format(TIME_FORMAT).to_string()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
