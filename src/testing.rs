//! Testing utilities for tagtree
//!
//! This module provides an in-memory [`TagSource`] and small tree fixtures so
//! unit tests never have to run the real tagging program.
//!
//! Only available when compiled with `cfg(test)`.

use std::path::Path;

use crate::tagger::{TagRecord, TagSource, TaggerError};
use crate::tree::Node;

/// Build a record from a path and tag names
pub fn record(path: &str, tags: &[&str]) -> TagRecord {
    TagRecord::new(path, tags.iter().map(|t| (*t).to_string()))
}

/// Build a childless node from a path and tag names
pub fn node(path: &str, tags: &[&str]) -> Node {
    Node::new(path, tags.iter().map(|t| (*t).to_string()))
}

/// Attach `child` under `parent`, keyed by the child's name
pub fn attach(parent: &mut Node, child: Node) {
    parent.children.insert(child.name(), child);
}

/// A small media tree:
///
/// ```text
/// /media
///   Show [1080p]      {Blue}
///     cover.jpg
///     movie.mkv
///   show.S01E01.mkv   {Red}
///   show.S01E02.avi
/// ```
pub fn sample_tree() -> Node {
    let mut root = node("/media", &[]);
    let mut show = node("/media/Show [1080p]", &["Blue"]);
    attach(&mut show, node("/media/Show [1080p]/cover.jpg", &[]));
    attach(&mut show, node("/media/Show [1080p]/movie.mkv", &[]));
    attach(&mut root, show);
    attach(&mut root, node("/media/show.S01E01.mkv", &["Red"]));
    attach(&mut root, node("/media/show.S01E02.avi", &[]));
    root
}

/// [`TagSource`] answering from a fixed list of records
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<TagRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<TagRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: TagRecord) {
        self.records.push(record);
    }
}

impl TagSource for MemorySource {
    fn list_recursive(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.path != dir && r.path.starts_with(dir))
            .cloned()
            .collect())
    }

    fn list_level(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.path == dir || r.path.parent() == Some(dir))
            .cloned()
            .collect())
    }
}

/// A small library below `root`:
///
/// ```text
/// root
///   a.mkv   {Red}
///   b       {Blue}
///     c.avi
/// ```
pub fn library_source(root: &Path) -> MemorySource {
    MemorySource::new(vec![
        TagRecord::new(root.join("a.mkv"), vec!["Red".to_string()]),
        TagRecord::new(root.join("b"), vec!["Blue".to_string()]),
        TagRecord::new(root.join("b/c.avi"), Vec::new()),
    ])
}

/// [`TagSource`] whose every listing fails
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSource;

impl TagSource for FailingSource {
    fn list_recursive(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        Err(TaggerError::Status {
            program: "tag".into(),
            path: dir.to_path_buf(),
            status: "exit status: 1".into(),
            stderr: "boom".into(),
        })
    }

    fn list_level(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        self.list_recursive(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_tree_shape() {
        let root = sample_tree();
        assert_eq!(root.count(), 6);
        assert_eq!(root.children["Show [1080p]"].children.len(), 2);
    }

    #[test]
    fn test_memory_source_level_excludes_grandchildren() {
        let source = MemorySource::new(vec![record("/m/a", &[]), record("/m/a/b", &[])]);
        let level = source.list_level(Path::new("/m")).unwrap();
        assert_eq!(level.len(), 1);
    }

    #[test]
    fn test_memory_source_recursive_excludes_dir_itself() {
        let source = MemorySource::new(vec![record("/m/a", &[]), record("/m/a/b", &[])]);
        let below = source.list_recursive(Path::new("/m/a")).unwrap();
        assert_eq!(below, vec![record("/m/a/b", &[])]);
    }
}
