//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes them to stdout.
//!
//! ## Update
//!
//! Stdout gets exactly one line, printed before the descriptor is rewritten:
//!
//! ```text
//! Updating app.sml with deployment files...
//! ```
//!
//! The per-category summary goes to the log at info level
//! (`--log-level info`):
//!
//! ```text
//! page-en   pages-en   1 file
//! page-de   pages-de   (missing)
//! image     images     12 files
//!
//! Replaced deployment block in app.sml: 13 files
//! ```
//!
//! ## Check
//!
//! Prints the block exactly as it would be spliced, so it can be diffed
//! against the descriptor by hand.

use crate::deploy::DeployReport;
use crate::splice::{self, SpliceOutcome};
use crate::types::{CategoryEntries, Deployment};

/// The notice printed right before the descriptor is rewritten.
pub fn format_update_notice(descriptor: &str) -> String {
    format!("Updating {descriptor} with deployment files...")
}

pub fn print_update_notice(descriptor: &str) {
    println!("{}", format_update_notice(descriptor));
}

fn plural_files(n: usize) -> String {
    if n == 1 {
        "1 file".to_string()
    } else {
        format!("{n} files")
    }
}

/// One aligned row per category.
pub fn format_category_table(deployment: &Deployment) -> Vec<String> {
    let label_width = column_width(deployment, |c| c.category.label.len());
    let dir_width = column_width(deployment, |c| c.category.directory.len());

    deployment
        .categories
        .iter()
        .map(|c| {
            let status = if c.missing {
                "(missing)".to_string()
            } else {
                plural_files(c.entries.len())
            };
            format!(
                "{:<label_width$}   {:<dir_width$}   {}",
                c.category.label, c.category.directory, status
            )
        })
        .collect()
}

fn column_width(deployment: &Deployment, f: impl Fn(&CategoryEntries) -> usize) -> usize {
    deployment.categories.iter().map(f).max().unwrap_or(0)
}

/// Category table followed by a one-line outcome.
pub fn format_update_summary(report: &DeployReport, descriptor: &str) -> Vec<String> {
    let mut lines = format_category_table(&report.deployment);
    lines.push(String::new());

    let action = match report.splice.outcome {
        SpliceOutcome::Inserted => "Inserted deployment block into",
        SpliceOutcome::Replaced { .. } if !report.splice.changed => "Deployment block unchanged in",
        SpliceOutcome::Replaced { .. } => "Replaced deployment block in",
    };
    lines.push(format!(
        "{action} {descriptor}: {}",
        plural_files(report.deployment.entry_count())
    ));

    if let SpliceOutcome::Replaced { removed_duplicates } = report.splice.outcome
        && removed_duplicates > 0
    {
        lines.push(format!("Removed {removed_duplicates} extra deployment block(s)"));
    }
    lines
}

/// Emit the summary at info level, keeping stdout to the single notice line.
pub fn log_update_summary(report: &DeployReport, descriptor: &str) {
    for line in format_update_summary(report, descriptor) {
        tracing::info!("{line}");
    }
}

/// The block that `update` would write.
pub fn format_check(deployment: &Deployment) -> Vec<String> {
    splice::build_block(&deployment.render_body())
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn print_check(deployment: &Deployment) {
    for line in format_check(deployment) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splice::SpliceReport;
    use crate::types::{AssetCategory, ManifestEntry};
    use std::path::PathBuf;

    fn sample() -> Deployment {
        let entry = |path: &str, kind: &str| ManifestEntry {
            path: path.into(),
            time: "2024.03.05 10.07.33".into(),
            kind: kind.into(),
        };
        Deployment {
            categories: vec![
                CategoryEntries {
                    category: AssetCategory::new("page-en", "pages-en"),
                    entries: vec![entry("home.sml", "page-en")],
                    missing: false,
                },
                CategoryEntries {
                    category: AssetCategory::new("page-de", "pages-de"),
                    entries: vec![],
                    missing: true,
                },
                CategoryEntries {
                    category: AssetCategory::new("image", "images"),
                    entries: vec![entry("a.png", "image"), entry("b.png", "image")],
                    missing: false,
                },
            ],
        }
    }

    fn report(outcome: SpliceOutcome, changed: bool) -> DeployReport {
        DeployReport {
            descriptor: PathBuf::from("app.sml"),
            deployment: sample(),
            splice: SpliceReport { outcome, changed },
        }
    }

    #[test]
    fn update_notice_names_descriptor() {
        assert_eq!(
            format_update_notice("app.sml"),
            "Updating app.sml with deployment files..."
        );
    }

    #[test]
    fn category_table_is_aligned() {
        let lines = format_category_table(&sample());
        assert_eq!(lines[0], "page-en   pages-en   1 file");
        assert_eq!(lines[1], "page-de   pages-de   (missing)");
        assert_eq!(lines[2], "image     images     2 files");
    }

    #[test]
    fn summary_reports_replacement() {
        let lines = format_update_summary(
            &report(SpliceOutcome::Replaced { removed_duplicates: 0 }, true),
            "app.sml",
        );
        assert_eq!(lines.last().unwrap(), "Replaced deployment block in app.sml: 3 files");
    }

    #[test]
    fn summary_reports_unchanged() {
        let lines = format_update_summary(
            &report(SpliceOutcome::Replaced { removed_duplicates: 0 }, false),
            "app.sml",
        );
        assert_eq!(lines.last().unwrap(), "Deployment block unchanged in app.sml: 3 files");
    }

    #[test]
    fn summary_reports_insert_and_duplicates() {
        let inserted = format_update_summary(&report(SpliceOutcome::Inserted, true), "app.sml");
        assert!(inserted.last().unwrap().starts_with("Inserted deployment block into app.sml"));

        let deduped = format_update_summary(
            &report(SpliceOutcome::Replaced { removed_duplicates: 2 }, true),
            "app.sml",
        );
        assert_eq!(deduped.last().unwrap(), "Removed 2 extra deployment block(s)");
    }

    #[test]
    fn check_prints_full_block() {
        let lines = format_check(&sample());
        assert_eq!(lines.first().unwrap(), splice::START_MARKER);
        assert_eq!(lines[1], "Deployment {");
        assert_eq!(lines.len(), 2 + 3 + 2);
        assert_eq!(lines.last().unwrap(), splice::END_MARKER);
    }
}
