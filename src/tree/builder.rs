//! Flat tag listings to nested trees
//!
//! The tagging tool reports one record per filesystem entry. [`build_tree`]
//! sorts those records by path string, which puts every directory ahead of
//! its contents, and then hangs each record under its already-built parent.
//!
//! [`collect_filtered`] avoids listing a whole huge tree when only tagged
//! subtrees are wanted: it lists the root one level deep and only fully lists
//! the entries that carry a wanted tag.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use super::error::TreeError;
use super::{Node, NodeMetadata};
use crate::tagger::{TagRecord, TagSource, TaggerError};

/// Matches entries carrying any of a set of tags, ignoring case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPredicate {
    tags: BTreeSet<String>,
}

impl TagPredicate {
    #[must_use]
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags.into_iter().map(|t| t.as_ref().to_lowercase()).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[must_use]
    pub fn matches(&self, tags: &BTreeSet<String>) -> bool {
        tags.iter().any(|t| self.tags.contains(&t.to_lowercase()))
    }
}

/// How a root gets scanned
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Only descend into top-level entries carrying one of these tags
    pub filter: Option<TagPredicate>,
    /// Attach filesystem metadata to every node
    pub with_metadata: bool,
}

/// Scan `root` through `source` and build its tree.
///
/// # Errors
///
/// Returns `TreeError` if the tagging tool fails or reports entries that do
/// not form a tree under `root`.
pub fn scan<S>(source: &S, root: &Path, options: &ScanOptions) -> Result<Node, TreeError>
where
    S: TagSource + ?Sized,
{
    match options.filter.as_ref().filter(|p| !p.is_empty()) {
        Some(predicate) => build_filtered(source, root, predicate, options.with_metadata),
        None => build_tree(root, source.list_recursive(root)?, options.with_metadata),
    }
}

/// Build the tree rooted at `root` from a flat listing.
///
/// The root is synthesized without tags when the listing does not contain
/// it. When a path is listed twice the last record wins.
///
/// # Errors
///
/// Returns `TreeError::MalformedTreeInput` if a record lies outside `root` or
/// its parent directory was never listed.
pub fn build_tree<I>(root: &Path, records: I, with_metadata: bool) -> Result<Node, TreeError>
where
    I: IntoIterator<Item = TagRecord>,
{
    let root = normalize(root);
    let mut flat: BTreeMap<String, TagRecord> = BTreeMap::new();
    for mut record in records {
        record.path = normalize(&record.path);
        flat.insert(record.path.to_string_lossy().into_owned(), record);
    }

    let root_key = root.to_string_lossy().into_owned();
    let root_record = flat
        .remove(&root_key)
        .unwrap_or_else(|| TagRecord::new(root.clone(), Vec::new()));
    let mut top = make_node(root_record, with_metadata);

    for record in flat.into_values() {
        let relative = record
            .path
            .strip_prefix(&root)
            .map_err(|_| TreeError::malformed(&record.path, "not below the scanned root"))?
            .to_path_buf();

        let mut segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some(name) = segments.pop() else {
            return Err(TreeError::malformed(&record.path, "empty path segment"));
        };

        let parent = find_nested_mut(&mut top, &segments)
            .ok_or_else(|| TreeError::malformed(&record.path, "parent was not listed before it"))?;
        parent.children.insert(name, make_node(record, with_metadata));
    }

    debug!(root = %root.display(), nodes = top.count(), "built tree");
    Ok(top)
}

/// Build the tree rooted at `root` from a filtered scan.
///
/// # Errors
///
/// Returns `TreeError` if the tagging tool fails or its records do not form
/// a tree.
pub fn build_filtered<S>(
    source: &S,
    root: &Path,
    predicate: &TagPredicate,
    with_metadata: bool,
) -> Result<Node, TreeError>
where
    S: TagSource + ?Sized,
{
    let records = collect_filtered(source, root, predicate)?;
    build_tree(root, records, with_metadata)
}

/// List the records a filtered scan of `root` keeps.
///
/// Each top-level entry matching `predicate` is kept together with its
/// complete contents. The root is kept as an anchor even when it does not
/// match. Every other entry is dropped without being descended into. Parents
/// always precede their contents in the result.
///
/// # Errors
///
/// Returns `TaggerError` if any listing fails.
pub fn collect_filtered<S>(
    source: &S,
    root: &Path,
    predicate: &TagPredicate,
) -> Result<Vec<TagRecord>, TaggerError>
where
    S: TagSource + ?Sized,
{
    let mut kept = Vec::new();
    for record in source.list_level(root)? {
        if predicate.matches(&record.tags) {
            let below = source.list_recursive(&record.path)?;
            debug!(path = %record.path.display(), entries = below.len(), "filtered scan match");
            kept.push(record);
            kept.extend(below);
        } else if record.path == root {
            kept.push(record);
        }
    }
    Ok(kept)
}

fn find_nested_mut<'a>(top: &'a mut Node, segments: &[String]) -> Option<&'a mut Node> {
    let mut entry = top;
    for name in segments {
        entry = entry.children.get_mut(name)?;
    }
    Some(entry)
}

fn make_node(record: TagRecord, with_metadata: bool) -> Node {
    let metadata = if with_metadata {
        match NodeMetadata::read(&record.path) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!(path = %record.path.display(), error = %e, "could not stat entry");
                None
            }
        }
    } else {
        None
    };

    Node {
        path: record.path,
        tags: record.tags,
        metadata,
        children: BTreeMap::new(),
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
