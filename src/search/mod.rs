//! Search over cached tag trees
//!
//! A query is a list of terms. Terms starting with [`TAG_MARKER`] name a tag
//! the file must carry; every other term is a regular expression that must
//! match somewhere in the file's path relative to its root. All terms must
//! hold for a file to match.
//!
//! Only leaves are candidates. Junk (see [`crate::junk`]) is skipped unless
//! asked for.
//!
//! Results are ordered either by the first `.NN.NN.NN.` date stamp found in
//! the relative path (undated files first) or alphanumerically.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::cache::CacheStore;
use crate::junk::is_junk;
use crate::tree::{Node, walk_down};

pub mod error;

pub use error::SearchError;

/// Prefix marking a term as a tag predicate
pub const TAG_MARKER: char = '@';

/// Sort prefix of files without a date stamp
pub const UNDATED_STAMP: &str = ".00.00.00.";

static DATE_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.([0-9]{2})\.([0-9]{2})\.([0-9]{2})\.")
        .unwrap_or_else(|e| panic!("invalid date stamp pattern: {e}"))
});

/// Compiled search terms
#[derive(Debug, Clone)]
pub struct Query {
    names: Vec<Regex>,
    tags: Vec<String>,
}

impl Query {
    /// Split `terms` into tag and name predicates
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidPattern` for a name term that is not a
    /// valid regex and `SearchError::EmptyTag` for a bare marker.
    pub fn parse<S: AsRef<str>>(terms: &[S], ignore_case: bool) -> Result<Self, SearchError> {
        let mut names = Vec::new();
        let mut tags = Vec::new();

        for term in terms {
            let term = term.as_ref();
            if let Some(tag) = term.strip_prefix(TAG_MARKER) {
                if tag.is_empty() {
                    return Err(SearchError::EmptyTag(term.to_string()));
                }
                tags.push(tag.to_lowercase());
            } else {
                let regex = RegexBuilder::new(term)
                    .case_insensitive(ignore_case)
                    .build()
                    .map_err(|e| SearchError::InvalidPattern {
                        pattern: term.to_string(),
                        reason: e.to_string(),
                    })?;
                names.push(regex);
            }
        }

        Ok(Self { names, tags })
    }

    /// Whether a file with this relative path and node matches every term
    #[must_use]
    pub fn matches(&self, relative: &str, node: &Node) -> bool {
        if !self.names.iter().all(|r| r.is_match(relative)) {
            return false;
        }
        if self.tags.is_empty() {
            return true;
        }
        let lower = node.lower_tags();
        self.tags.iter().all(|t| lower.contains(t))
    }
}

/// Knobs of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Skip files fewer than this many levels below their root
    pub min_depth: usize,
    /// Order by embedded date stamp instead of alphanumerically
    pub date_sort: bool,
    /// Keep files the junk classifier flags
    pub include_junk: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_depth: 0,
            date_sort: true,
            include_junk: false,
        }
    }
}

/// A matching leaf and the root of the tree it was found in
#[derive(Debug, Clone, Copy)]
pub struct SearchResult<'a> {
    pub node: &'a Node,
    pub root: &'a Node,
}

impl SearchResult<'_> {
    /// Path segments of the match below its root
    #[must_use]
    pub fn parts(&self) -> Vec<String> {
        relative_parts(self.node, self.root)
    }

    /// Path of the match below its root, joined with `/`
    #[must_use]
    pub fn term(&self) -> String {
        self.parts().join("/")
    }
}

fn relative_parts(node: &Node, root: &Node) -> Vec<String> {
    node.path
        .strip_prefix(&root.path)
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

/// Search the cached trees: the one for `target`, or all of them
///
/// # Errors
///
/// Returns `SearchError::Cache` if `target` is not cached.
pub fn search<'a>(
    store: &'a CacheStore,
    target: Option<&Path>,
    query: &Query,
    options: &SearchOptions,
) -> Result<Vec<SearchResult<'a>>, SearchError> {
    let tops = store.tops(target)?;
    Ok(search_trees(&tops, query, options))
}

/// Search the given trees and return matches in sorted order
#[must_use]
pub fn search_trees<'a>(
    tops: &[&'a Node],
    query: &Query,
    options: &SearchOptions,
) -> Vec<SearchResult<'a>> {
    let mut results = Vec::new();
    for top in tops {
        search_top(top, query, options, &mut results);
    }
    results.sort_by_cached_key(|r| sort_key(&r.term(), options.date_sort));
    results
}

fn search_top<'a>(
    top: &'a Node,
    query: &Query,
    options: &SearchOptions,
    results: &mut Vec<SearchResult<'a>>,
) {
    walk_down(
        top,
        |node, depth: &usize| {
            if node.is_leaf()
                && *depth >= options.min_depth
                && (options.include_junk || !is_junk(&node.name()))
            {
                let result = SearchResult { node, root: top };
                if query.matches(&result.term(), node) {
                    results.push(result);
                }
            }
            depth + 1
        },
        0,
    );
}

/// Ordering key of a relative path
///
/// ```
/// use tagtree::search::sort_key;
///
/// assert_eq!(sort_key("a/Site.21.04.03.Title.mkv", true), ".21.04.03.a/Site.21.04.03.Title.mkv");
/// assert_eq!(sort_key("a/Plain Title.mkv", true), ".00.00.00.a/Plain Title.mkv");
/// assert_eq!(sort_key("a/Plain Title.mkv", false), "aplaintitlemkv");
/// ```
#[must_use]
pub fn sort_key(term: &str, date_sort: bool) -> String {
    if date_sort {
        let stamp = DATE_STAMP
            .find(term)
            .map_or(UNDATED_STAMP, |m| m.as_str());
        format!("{stamp}{term}")
    } else {
        term.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .flat_map(char::to_lowercase)
            .collect()
    }
}
