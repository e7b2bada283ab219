//! Project configuration module.
//!
//! Handles loading, validating, and merging `deploy.toml`. Every key is
//! optional: stock defaults reproduce the classic project layout, and a user
//! file only needs the values it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! my-app/
//! ├── deploy.toml      # Optional, overrides stock defaults
//! ├── app.sml          # Descriptor whose deployment block is rewritten
//! ├── pages-en/
//! ├── parts-en/
//! └── images/
//! ```
//!
//! A different file can be passed with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! descriptor = "app.sml"          # File holding the deployment block
//! sort = true                     # Sort entries by path within a category
//! missing_directories = "skip"    # "skip" or "error"
//! skip_hidden_directories = false # Do not descend into `.name` directories
//! exclude = [".DS_Store"]         # Filenames skipped in every category
//!
//! [[categories]]
//! label = "page-en"
//! directory = "pages-en"
//! exclude = []                    # Extra filenames for this category only
//! ```
//!
//! Supplying `categories` replaces the whole stock table rather than
//! appending to it. Unknown keys are rejected to catch typos early.

use crate::types::AssetCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the project root.
pub const CONFIG_FILENAME: &str = "deploy.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// What to do when a category directory does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDirectories {
    /// Record zero entries for the category and carry on.
    #[default]
    Skip,
    /// Abort the run.
    Error,
}

/// Deployment configuration loaded from `deploy.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// Descriptor file, relative to the project root.
    pub descriptor: String,
    /// Sort entries by path within each category.
    pub sort: bool,
    pub missing_directories: MissingDirectories,
    /// Skip whole subtrees whose directory name starts with `.`.
    pub skip_hidden_directories: bool,
    /// Filenames excluded from every category.
    pub exclude: Vec<String>,
    /// Categories in the order their entries appear in the block.
    pub categories: Vec<AssetCategory>,
}

/// Languages with localized `pages-*` and `parts-*` directories, in block order.
const LANGUAGES: &[&str] = &["en", "de", "es", "pt", "fr", "eo"];

/// Flat media categories as `(label, directory)`.
const MEDIA: &[(&str, &str)] = &[
    ("image", "images"),
    ("sound", "sounds"),
    ("video", "videos"),
    ("texture", "textures"),
    ("model", "models"),
];

/// The built-in category table: pages per language, parts per language, then media.
pub fn default_categories() -> Vec<AssetCategory> {
    let pages = LANGUAGES
        .iter()
        .map(|lang| AssetCategory::new(&format!("page-{lang}"), &format!("pages-{lang}")));
    let parts = LANGUAGES
        .iter()
        .map(|lang| AssetCategory::new(&format!("part-{lang}"), &format!("parts-{lang}")));
    let media = MEDIA
        .iter()
        .map(|(label, dir)| AssetCategory::new(label, dir));
    pages.chain(parts).chain(media).collect()
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            descriptor: "app.sml".to_string(),
            sort: true,
            missing_directories: MissingDirectories::default(),
            skip_hidden_directories: false,
            exclude: vec![".DS_Store".to_string()],
            categories: default_categories(),
        }
    }
}

impl DeployConfig {
    /// Validate the category table and descriptor path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.descriptor.trim().is_empty() {
            return Err(ConfigError::Validation(
                "descriptor must not be empty".into(),
            ));
        }
        if self.categories.is_empty() {
            return Err(ConfigError::Validation(
                "categories must not be empty".into(),
            ));
        }
        let mut labels = HashSet::new();
        for category in &self.categories {
            if category.label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category for directory '{}' has an empty label",
                    category.directory
                )));
            }
            if category.directory.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{}' has an empty directory",
                    category.label
                )));
            }
            if Path::new(&category.directory).is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "category '{}' directory must be relative to the project root",
                    category.label
                )));
            }
            if !labels.insert(category.label.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category label '{}'",
                    category.label
                )));
            }
        }
        Ok(())
    }

    /// Global excludes followed by the category's own.
    pub fn exclusions_for(&self, category: &AssetCategory) -> Vec<String> {
        self.exclude
            .iter()
            .chain(category.exclude.iter())
            .cloned()
            .collect()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(DeployConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Arrays and scalars in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<DeployConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: DeployConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the project config.
///
/// An explicit `config_file` must exist. Without one, `deploy.toml` in the
/// project root is used when present and stock defaults otherwise.
pub fn load_config(root: &Path, config_file: Option<&Path>) -> Result<DeployConfig, ConfigError> {
    let overlay = match config_file {
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let path = root.join(CONFIG_FILENAME);
            if path.exists() {
                Some(load_raw_config(&path)?)
            } else {
                None
            }
        }
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `deploy.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sml-deploy Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Descriptor file (relative to the project root) holding the block between
# "// deployment start" and "// deployment end".
descriptor = "app.sml"

# Sort entries by path within each category. Set to false to keep the order
# the file system returns (may differ between machines).
sort = true

# What to do when a category directory does not exist: "skip" or "error".
missing_directories = "skip"

# Do not descend into directories whose name starts with a dot.
# Hidden files are always skipped.
skip_hidden_directories = false

# Filenames skipped in every category.
exclude = [".DS_Store"]

# ---------------------------------------------------------------------------
# Categories, in the order their entries appear in the deployment block.
# Listing any category replaces this whole table.
# Each entry may add its own `exclude = [...]`.
# ---------------------------------------------------------------------------
[[categories]]
label = "page-en"
directory = "pages-en"

[[categories]]
label = "page-de"
directory = "pages-de"

[[categories]]
label = "page-es"
directory = "pages-es"

[[categories]]
label = "page-pt"
directory = "pages-pt"

[[categories]]
label = "page-fr"
directory = "pages-fr"

[[categories]]
label = "page-eo"
directory = "pages-eo"

[[categories]]
label = "part-en"
directory = "parts-en"

[[categories]]
label = "part-de"
directory = "parts-de"

[[categories]]
label = "part-es"
directory = "parts-es"

[[categories]]
label = "part-pt"
directory = "parts-pt"

[[categories]]
label = "part-fr"
directory = "parts-fr"

[[categories]]
label = "part-eo"
directory = "parts-eo"

[[categories]]
label = "image"
directory = "images"

[[categories]]
label = "sound"
directory = "sounds"

[[categories]]
label = "video"
directory = "videos"

[[categories]]
label = "texture"
directory = "textures"

[[categories]]
label = "model"
directory = "models"
"##
}
