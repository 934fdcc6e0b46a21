//! Tag trees
//!
//! A [`Node`] is one filesystem entry together with the tags the external
//! tagging tool reported for it. Trees are reconstructed from flat listings by
//! the [`builder`] module and traversed with [`walk()`].
//!
//! Children are keyed by their final path segment and kept in a `BTreeMap`,
//! so every traversal sees them in name order.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod error;
pub mod walk;

pub use builder::{ScanOptions, TagPredicate, build_filtered, build_tree, collect_filtered, scan};
pub use error::TreeError;
pub use walk::{walk, walk_down};

/// Stat-like payload attached to a node when a scan asks for it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NodeMetadata {
    pub is_dir: bool,
    pub len: u64,
    pub modified: Option<DateTime<Utc>>,
    pub readonly: bool,
}

impl NodeMetadata {
    /// Read the metadata of `path` from the filesystem
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the path cannot be stat'ed.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let meta = fs::metadata(path)?;
        Ok(Self {
            is_dir: meta.is_dir(),
            len: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
            readonly: meta.permissions().readonly(),
        })
    }
}

/// One entry of a tag tree
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub path: PathBuf,
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub metadata: Option<NodeMetadata>,
    #[serde(default)]
    pub children: BTreeMap<String, Node>,
}

impl Node {
    /// Create a childless node
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, tags: impl IntoIterator<Item = String>) -> Self {
        Self {
            path: path.into(),
            tags: tags.into_iter().collect(),
            metadata: None,
            children: BTreeMap::new(),
        }
    }

    /// Final path segment, or the whole path for filesystem roots
    #[must_use]
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        )
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this node stands for a directory.
    ///
    /// Metadata is authoritative when it was captured; otherwise any node
    /// with children is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.metadata
            .as_ref()
            .map_or(!self.children.is_empty(), |m| m.is_dir)
    }

    /// Case-insensitive tag membership
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// Lower-cased copy of the tag set
    #[must_use]
    pub fn lower_tags(&self) -> BTreeSet<String> {
        self.tags.iter().map(|t| t.to_lowercase()).collect()
    }

    /// Number of nodes in this subtree, including `self`
    #[must_use]
    pub fn count(&self) -> usize {
        walk(self, |_, _: &()| (), (), |children| 1 + children.sum::<usize>())
    }
}
