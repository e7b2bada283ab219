//! Orchestration: collect every category, then splice the result into the descriptor.
//!
//! Categories are visited in table order and their entries concatenated in
//! that order, so the block reads pages first, then parts, then media with
//! the stock table.

use crate::collect::{self, CollectError, CollectOptions};
use crate::config::{ConfigError, DeployConfig, MissingDirectories};
use crate::output;
use crate::splice::{self, SpliceError, SpliceReport};
use crate::types::{CategoryEntries, Deployment};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Collect error: {0}")]
    Collect(#[from] CollectError),
    #[error("Splice error: {0}")]
    Splice(#[from] SpliceError),
}

/// Everything an `update` run did.
#[derive(Debug)]
pub struct DeployReport {
    pub descriptor: PathBuf,
    pub deployment: Deployment,
    pub splice: SpliceReport,
}

/// Collect entries for every configured category under `root`.
///
/// Missing category directories are skipped or fatal according to
/// `config.missing_directories`.
pub fn collect(root: &Path, config: &DeployConfig) -> Result<Deployment, DeployError> {
    let mut categories = Vec::with_capacity(config.categories.len());

    for category in &config.categories {
        let options = CollectOptions {
            exclude: config.exclusions_for(category),
            sort: config.sort,
            skip_hidden_directories: config.skip_hidden_directories,
        };
        let base = root.join(&category.directory);

        let (entries, missing) =
            match collect::generate_deployment_data(&category.label, &base, &options) {
                Ok(entries) => (entries, false),
                Err(CollectError::MissingDirectory(path))
                    if config.missing_directories == MissingDirectories::Skip =>
                {
                    tracing::debug!(
                        label = %category.label,
                        path = %path.display(),
                        "category directory missing, skipped"
                    );
                    (Vec::new(), true)
                }
                Err(e) => return Err(e.into()),
            };

        categories.push(CategoryEntries {
            category: category.clone(),
            entries,
            missing,
        });
    }

    Ok(Deployment { categories })
}

/// Path of the descriptor file for this project.
pub fn descriptor_path(root: &Path, config: &DeployConfig) -> PathBuf {
    root.join(&config.descriptor)
}

/// Collect all categories and rewrite the descriptor's deployment block.
///
/// Prints a progress notice to stdout before the descriptor is touched.
pub fn update(root: &Path, config: &DeployConfig) -> Result<DeployReport, DeployError> {
    let deployment = collect(root, config)?;
    let descriptor = descriptor_path(root, config);

    output::print_update_notice(&config.descriptor);
    let splice = splice::update_deployment(&descriptor, &deployment.render_body())?;

    Ok(DeployReport {
        descriptor,
        deployment,
        splice,
    })
}
