//! # sml-deploy
//!
//! Build-time asset manifest generator for SML application projects. It walks
//! the project's asset directories, records each file's relative path, UTC
//! modification time and asset type, and rewrites the deployment block of the
//! app descriptor (`app.sml`) with the result.
//!
//! # Pipeline
//!
//! ```text
//! 1. Collect   pages-en/ … models/  →  Deployment   (one entry per file)
//! 2. Render    Deployment           →  block body   (File { ... } lines)
//! 3. Splice    app.sml + body       →  app.sml      (block replaced in place)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`collect`] | Walks one category directory into manifest entries |
//! | [`splice`] | Finds or inserts the marker-delimited block and rewrites the file |
//! | [`deploy`] | Runs every configured category, then the splice |
//! | [`config`] | `deploy.toml` loading, merging with stock defaults, validation |
//! | [`types`] | `ManifestEntry`, `AssetCategory`, `Deployment` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Categories Are Data
//!
//! The classic layout (six localized `pages-*` and `parts-*` directories plus
//! five media directories) is the stock category table in [`config`], not
//! code. Projects with a different layout list their own `[[categories]]`.
//!
//! ## Stable Output
//!
//! Entries are sorted by path within each category unless `sort = false`,
//! so the descriptor diffs cleanly in version control regardless of the
//! order the file system returns.
//!
//! ## Text, Not Grammar
//!
//! The descriptor is never parsed. The splicer only knows the two marker
//! comments and, for a descriptor without a block, its last closing brace.
//! Everything else in the file is carried through untouched.

pub mod collect;
pub mod config;
pub mod deploy;
pub mod output;
pub mod splice;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
