//! Shared types passed between the collector, the splicer and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One asset category: a directory under the project root whose files are
/// all tagged with the same `label` in the deployment block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetCategory {
    /// Value written into the `type:` field, e.g. `page-en` or `image`.
    pub label: String,
    /// Directory relative to the project root, e.g. `pages-en`.
    pub directory: String,
    /// Filenames skipped in this category on top of the global exclude list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl AssetCategory {
    pub fn new(label: &str, directory: &str) -> Self {
        Self {
            label: label.to_string(),
            directory: directory.to_string(),
            exclude: Vec::new(),
        }
    }
}

/// A single file recorded in the deployment block.
///
/// Renders (via `Display`) as one line of SML:
///
/// ```text
/// File { path: "cover.png" time: "2024.03.05 10.07.33" type: "image" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Path relative to the category directory, platform separators.
    pub path: String,
    /// Last modification time in UTC, `YYYY.MM.DD HH.MM.SS`.
    pub time: String,
    /// Category label.
    #[serde(rename = "type")]
    pub kind: String,
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File {{ path: \"{}\" time: \"{}\" type: \"{}\" }}",
            self.path, self.time, self.kind
        )
    }
}

/// Entries collected for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntries {
    pub category: AssetCategory,
    pub entries: Vec<ManifestEntry>,
    /// The category directory did not exist and was skipped.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub missing: bool,
}

/// Result of collecting every configured category, in table order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Deployment {
    pub categories: Vec<CategoryEntries>,
}

impl Deployment {
    /// All entries across categories, in category order.
    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Block body: one indented `File { ... }` line per entry.
    pub fn render_body(&self) -> String {
        self.entries()
            .map(|e| format!("  {e}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
