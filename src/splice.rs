//! Deployment block splicing.
//!
//! The descriptor is treated as opaque text. The only structure relied on is
//! the pair of marker comments and, when no block exists yet, the descriptor's
//! final closing brace:
//!
//! ```text
//! App {
//!   name: "demo"
//!   // deployment start - don't edit here
//!   Deployment {
//!     File { path: "home.sml" time: "2024.03.05 10.07.33" type: "page-en" }
//!   }
//!   // deployment end
//! }
//! ```
//!
//! With a block present, the region from the first `// deployment start` to
//! the next `// deployment end` is replaced and any later blocks are dropped.
//! Without one, the block goes in just before the last `}`. Text outside the
//! touched region is kept byte-for-byte.
//!
//! The file is rewritten through a sibling temp file and a rename, so an
//! interrupted run leaves either the old or the new descriptor.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

pub const START_MARKER: &str = "// deployment start - don't edit here";
pub const END_MARKER: &str = "// deployment end";

/// Matches on the start marker's prefix so hand-edited marker text still counts.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)// deployment start.*?// deployment end").expect("block pattern is valid")
});

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("No deployment block and no closing brace to insert before in {0}")]
    NoEnclosingBrace(PathBuf),
}

/// How the block got into the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// An existing block was replaced; `removed_duplicates` extra blocks were dropped.
    Replaced { removed_duplicates: usize },
    /// No block existed; one was inserted before the final closing brace.
    Inserted,
}

/// New descriptor text plus how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub content: String,
    pub outcome: SpliceOutcome,
}

/// Result of [`update_deployment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpliceReport {
    pub outcome: SpliceOutcome,
    /// False when the descriptor already held exactly this block; nothing was written.
    pub changed: bool,
}

/// Wrap a rendered body in the markers and the `Deployment { }` node.
pub fn build_block(body: &str) -> String {
    format!("{START_MARKER}\nDeployment {{\n{body}\n}}\n{END_MARKER}")
}

/// Splice `body` into `content`.
///
/// Returns `None` when `content` has no block and does not end in `}`
/// (ignoring trailing whitespace), since there is nowhere to put one.
pub fn splice(content: &str, body: &str) -> Option<Spliced> {
    let block = build_block(body);
    let mut matches = BLOCK_RE.find_iter(content);

    if let Some(first) = matches.next() {
        let mut out = String::with_capacity(content.len() + block.len());
        out.push_str(&content[..first.start()]);
        out.push_str(&block);

        let mut cursor = first.end();
        let mut removed_duplicates = 0;
        for extra in matches {
            out.push_str(&content[cursor..extra.start()]);
            cursor = extra.end();
            removed_duplicates += 1;
        }
        out.push_str(&content[cursor..]);

        return Some(Spliced {
            content: out,
            outcome: SpliceOutcome::Replaced { removed_duplicates },
        });
    }

    let trimmed = content.trim_end();
    let head = trimmed.strip_suffix('}')?;
    let tail = &content[trimmed.len()..];
    Some(Spliced {
        content: format!("{head}\n{block}\n}}{tail}"),
        outcome: SpliceOutcome::Inserted,
    })
}

/// Rewrite the deployment block of the descriptor at `path` with `body`.
pub fn update_deployment(path: &Path, body: &str) -> Result<SpliceReport, SpliceError> {
    let content = fs::read_to_string(path)?;
    let spliced =
        splice(&content, body).ok_or_else(|| SpliceError::NoEnclosingBrace(path.to_path_buf()))?;

    if let SpliceOutcome::Replaced { removed_duplicates } = spliced.outcome
        && removed_duplicates > 0
    {
        tracing::warn!(
            path = %path.display(),
            removed_duplicates,
            "dropped extra deployment blocks"
        );
    }

    let changed = spliced.content != content;
    if changed {
        write_atomic(path, &spliced.content)?;
        tracing::info!(path = %path.display(), outcome = ?spliced.outcome, "descriptor updated");
    } else {
        tracing::debug!(path = %path.display(), "descriptor already up to date");
    }

    Ok(SpliceReport {
        outcome: spliced.outcome,
        changed,
    })
}

/// Write to a sibling temp file, then rename over `path`.
///
/// A symlinked `path` is resolved first so the link keeps pointing at the
/// rewritten target.
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let target = fs::canonicalize(path)?;
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let temp_path = target.with_file_name(format!(".{file_name}.tmp"));

    let written = fs::metadata(&target).and_then(|metadata| {
        fs::write(&temp_path, content)?;
        fs::set_permissions(&temp_path, metadata.permissions())?;
        fs::rename(&temp_path, &target)
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}
