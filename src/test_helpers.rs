//! Shared test utilities for the sml-deploy test suite.
//!
//! Provides the fixture project copier, mtime helpers, and lookups over
//! collected [`Deployment`]s.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let deployment = collect(tmp.path(), &DeployConfig::default()).unwrap();
//!
//! let images = find_category(&deployment, "image");
//! assert_eq!(entry_paths(images), vec!["icon.png"]);
//! ```

use chrono::{TimeZone, Utc};
use std::fs::File;
use std::path::Path;
use std::time::SystemTime;
use tempfile::TempDir;

use crate::types::{CategoryEntries, Deployment};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/project/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/project");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Timestamps
// =========================================================================

/// A `SystemTime` at the given UTC wall-clock instant.
pub fn utc_time(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> SystemTime {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .unwrap()
        .into()
}

/// Set a file's modification time.
pub fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

// =========================================================================
// Deployment lookups: panics with a clear message on miss
// =========================================================================

/// Find a category's entries by label. Panics if not found.
pub fn find_category<'a>(deployment: &'a Deployment, label: &str) -> &'a CategoryEntries {
    deployment
        .categories
        .iter()
        .find(|c| c.category.label == label)
        .unwrap_or_else(|| {
            let labels: Vec<&str> = deployment
                .categories
                .iter()
                .map(|c| c.category.label.as_str())
                .collect();
            panic!("category '{label}' not found. Available: {labels:?}")
        })
}

/// Entry paths of one category, in collected order.
pub fn entry_paths(category: &CategoryEntries) -> Vec<&str> {
    category.entries.iter().map(|e| e.path.as_str()).collect()
}
