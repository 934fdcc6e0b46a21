//! Access to the external tagging tool
//!
//! Tags are assigned by an outside program; this module only asks it for
//! listings. [`TagSource`] is the seam the tree builder scans through, and
//! [`TagCommand`] implements it by running a command-line tool that prints
//! one `path<TAB>tag1,tag2` line per entry (the `tag` utility by default).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

pub mod error;

pub use error::TaggerError;

/// Default program used to list tags
pub const DEFAULT_TAG_PROGRAM: &str = "tag";

/// One entry reported by the tagging tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub path: PathBuf,
    pub tags: BTreeSet<String>,
}

impl TagRecord {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, tags: impl IntoIterator<Item = String>) -> Self {
        Self {
            path: path.into(),
            tags: tags.into_iter().collect(),
        }
    }
}

/// Source of tag listings for a directory
pub trait TagSource {
    /// Every entry below `dir`, at any depth.
    ///
    /// Listing something that is not a directory yields no entries.
    ///
    /// # Errors
    /// Returns `TaggerError` if the listing cannot be produced.
    fn list_recursive(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError>;

    /// The immediate entries of `dir`.
    ///
    /// # Errors
    /// Returns `TaggerError` if the listing cannot be produced.
    fn list_level(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError>;
}

/// [`TagSource`] backed by an external program
#[derive(Debug, Clone)]
pub struct TagCommand {
    program: String,
}

impl Default for TagCommand {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_PROGRAM)
    }
}

impl TagCommand {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, mode: &str, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        debug!(program = %self.program, mode, dir = %dir.display(), "listing tags");
        let output = Command::new(&self.program)
            .arg("-l")
            .arg(mode)
            .arg(dir)
            .output()
            .map_err(|source| TaggerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(TaggerError::Status {
                program: self.program.clone(),
                path: dir.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| TaggerError::Output {
            program: self.program.clone(),
            path: dir.to_path_buf(),
        })?;

        Ok(parse_listing(dir, &stdout))
    }
}

impl TagSource for TagCommand {
    fn list_recursive(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        self.run("-R", dir)
    }

    fn list_level(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        self.run("-e", dir)
    }
}

/// Parse `path<TAB>tags` lines as printed by the tagging tool.
///
/// Relative paths are resolved against `dir`. A line without a tag field
/// describes an untagged entry; blank lines are skipped.
///
/// ```
/// use std::path::Path;
/// use tagtree::tagger::parse_listing;
///
/// let records = parse_listing(Path::new("/media"), "a.mkv\tRed,Blue\nb.avi\n");
/// assert_eq!(records.len(), 2);
/// assert!(records[0].tags.contains("Blue"));
/// assert!(records[1].tags.is_empty());
/// ```
#[must_use]
pub fn parse_listing(dir: &Path, output: &str) -> Vec<TagRecord> {
    output
        .lines()
        .filter_map(|line| {
            let (name, tags) = line.split_once('\t').unwrap_or((line, ""));
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let tags = tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from);
            Some(TagRecord::new(dir.join(name), tags))
        })
        .collect()
}
