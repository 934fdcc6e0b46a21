//! Cleanup planning for tagged release folders
//!
//! A folder directly under a root that carries tags and holds exactly one
//! file worth keeping (everything else being junk) can be flattened: the
//! keeper moves up next to the folder under the folder's clean name, picks up
//! the folder's tags, and the junk and the folder go away.
//!
//! [`gather`] plans the other tidy-up: every top-level entry carrying a tag
//! moves into a folder named after that tag.
//!
//! Planning never touches the filesystem. A [`CleanupPlan`] is a list of
//! actions whose `Display` form is a line of `sh` with every path and tag
//! single-quoted.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::junk::is_junk;
use crate::tree::Node;

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\[[^\]]*\]$").unwrap_or_else(|e| panic!("invalid annotation pattern: {e}"))
});

/// One step of a cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupAction {
    /// Create a directory and any missing parents
    MakeDir { path: PathBuf },
    /// Move a file to a new path
    Move { from: PathBuf, to: PathBuf },
    /// Add a tag to a file
    Tag { tag: String, path: PathBuf },
    /// Remove a junk entry, recursively when it is a directory
    Remove { path: PathBuf },
    /// Remove a directory that is empty by now
    RemoveDir { path: PathBuf },
}

impl fmt::Display for CleanupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MakeDir { path } => write!(f, "mkdir -p {}", quote_path(path)),
            Self::Move { from, to } => {
                write!(f, "mv {} {}", quote_path(from), quote_path(to))
            }
            Self::Tag { tag, path } => {
                write!(f, "tag -a {} {}", shell_quote(tag), quote_path(path))
            }
            Self::Remove { path } => write!(f, "rm -r {}", quote_path(path)),
            Self::RemoveDir { path } => write!(f, "rmdir {}", quote_path(path)),
        }
    }
}

/// `word` as a single-quoted `sh` word
///
/// ```
/// use tagtree::cleanup::shell_quote;
///
/// assert_eq!(shell_quote("Show [1080p]"), "'Show [1080p]'");
/// assert_eq!(shell_quote("it's"), r"'it'\''s'");
/// ```
#[must_use]
pub fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

fn quote_path(path: &Path) -> String {
    shell_quote(&path.to_string_lossy())
}

/// Actions tidying one folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPlan {
    pub folder: PathBuf,
    pub actions: Vec<CleanupAction>,
}

/// Plan cleanups for the folders directly under `top`.
///
/// With `tag` given only folders carrying that tag (ignoring case) are
/// considered; otherwise any tagged folder is.
#[must_use]
pub fn plan(top: &Node, tag: Option<&str>) -> Vec<CleanupPlan> {
    top.children
        .values()
        .filter(|folder| folder.is_dir() && is_selected(folder, tag))
        .filter_map(plan_folder)
        .collect()
}

fn is_selected(folder: &Node, tag: Option<&str>) -> bool {
    match tag {
        Some(tag) => folder.has_tag(tag),
        None => !folder.tags.is_empty(),
    }
}

/// Plan the cleanup of a single folder, if it has exactly one keeper
///
/// A keeper whose new name would be the folder's own path gets no plan.
#[must_use]
pub fn plan_folder(folder: &Node) -> Option<CleanupPlan> {
    let (junk, keepers): (Vec<&Node>, Vec<&Node>) = folder
        .children
        .values()
        .partition(|child| is_junk(&child.name()));
    let [keeper] = keepers.as_slice() else {
        return None;
    };

    let clean = clean_name(&folder.name());
    let keeper_name = keeper.name();
    let new_name = if keeper_name.to_lowercase().starts_with(&clean.to_lowercase()) {
        keeper_name
    } else {
        format!("{clean}{}", extension(&keeper_name).unwrap_or(""))
    };
    let parent = folder.path.parent().unwrap_or_else(|| Path::new(""));
    let new_path = parent.join(new_name);
    if new_path == folder.path {
        warn!(folder = %folder.path.display(), keeper = %keeper.path.display(), "keeper would replace its own folder, skipping");
        return None;
    }

    let mut actions = vec![CleanupAction::Move {
        from: keeper.path.clone(),
        to: new_path.clone(),
    }];
    actions.extend(folder.tags.iter().map(|tag| CleanupAction::Tag {
        tag: tag.clone(),
        path: new_path.clone(),
    }));
    actions.extend(junk.iter().map(|j| CleanupAction::Remove {
        path: j.path.clone(),
    }));
    actions.push(CleanupAction::RemoveDir {
        path: folder.path.clone(),
    });

    Some(CleanupPlan {
        folder: folder.path.clone(),
        actions,
    })
}

/// Plan moving every entry directly under `top` that carries `tag` into the
/// folder `top/tag`.
///
/// Tags compare ignoring case. Returns `None` when nothing carries the tag.
#[must_use]
pub fn gather(top: &Node, tag: &str) -> Option<CleanupPlan> {
    let folder = top.path.join(tag);
    let moves: Vec<CleanupAction> = top
        .children
        .values()
        .filter(|entry| entry.path != folder && entry.has_tag(tag))
        .map(|entry| CleanupAction::Move {
            from: entry.path.clone(),
            to: folder.join(entry.name()),
        })
        .collect();
    if moves.is_empty() {
        return None;
    }

    let mut actions = Vec::with_capacity(moves.len() + 1);
    actions.push(CleanupAction::MakeDir {
        path: folder.clone(),
    });
    actions.extend(moves);
    Some(CleanupPlan { folder, actions })
}

/// Folder name without a trailing `[...]` annotation
///
/// ```
/// use tagtree::cleanup::clean_name;
///
/// assert_eq!(clean_name("Show [1080p]"), "Show");
/// assert_eq!(clean_name("Plain Folder"), "Plain Folder");
/// ```
#[must_use]
pub fn clean_name(name: &str) -> String {
    ANNOTATION
        .captures(name)
        .and_then(|c| c.get(1))
        .map_or(name, |m| m.as_str().trim_end())
        .to_string()
}

fn extension(name: &str) -> Option<&str> {
    name.rfind('.').map(|i| &name[i..])
}
