//! Output formatting for CLI display
//!
//! This module renders tags, tree lines and search results for the terminal.

use byte_unit::{Byte, UnitType};
use colored::Colorize;

use crate::tree::{Node, NodeMetadata};

/// Tags shown as a colored dot instead of their name
const TAG_GLYPHS: &[(&str, &str)] = &[
    ("Red", "🔴"),
    ("Green", "🟢"),
    ("Blue", "🔵"),
    ("Purple", "🟣"),
];

/// Display form of a single tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagGlyph {
    Known(&'static str),
    Raw(String),
}

impl TagGlyph {
    #[must_use]
    pub fn of(tag: &str) -> Self {
        TAG_GLYPHS
            .iter()
            .find(|(name, _)| *name == tag)
            .map_or_else(|| Self::Raw(tag.to_string()), |&(_, glyph)| Self::Known(glyph))
    }
}

impl std::fmt::Display for TagGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(glyph) => f.write_str(glyph),
            Self::Raw(name) => write!(f, "@{name}"),
        }
    }
}

/// Render a tag for display
///
/// ```
/// use tagtree::output::format_tag;
///
/// assert_eq!(format_tag("Red"), "🔴");
/// assert_eq!(format_tag("Archive"), "@Archive");
/// ```
#[must_use]
pub fn format_tag(tag: &str) -> String {
    TagGlyph::of(tag).to_string()
}

/// Render a tag set, space separated
#[must_use]
pub fn format_tags<'a>(tags: impl IntoIterator<Item = &'a String>) -> String {
    tags.into_iter()
        .map(|t| format_tag(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line of `show` output for `node` at `depth`
#[must_use]
pub fn tree_line(node: &Node, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let name = if node.is_dir() {
        node.name().bold().to_string()
    } else {
        node.name()
    };

    let mut line = format!("{indent}{name}");
    if !node.tags.is_empty() {
        line.push(' ');
        line.push_str(&format_tags(&node.tags));
    }
    if let Some(meta) = &node.metadata {
        line.push(' ');
        line.push_str(&format_metadata(meta).dimmed().to_string());
    }
    line
}

/// Size, modification time when known, and a read-only marker
#[must_use]
pub fn format_metadata(meta: &NodeMetadata) -> String {
    let mut parts = vec![
        Byte::from_u64(meta.len)
            .get_appropriate_unit(UnitType::Binary)
            .to_string(),
    ];
    if let Some(modified) = meta.modified {
        parts.push(modified.format("%Y-%m-%d %H:%M").to_string());
    }
    if meta.readonly {
        parts.push("read-only".to_string());
    }
    format!("({})", parts.join(", "))
}

/// One line of search output
#[must_use]
pub fn result_line(term: &str, node: &Node, root: Option<&Node>, quiet: bool) -> String {
    if quiet {
        return node.path.display().to_string();
    }

    let mut line = format!("{} {term}", "*".bold());
    if !node.tags.is_empty() {
        line.push(' ');
        line.push_str(&format_tags(&node.tags));
    }
    if let Some(root) = root {
        line.push_str(&format!(" {}", format!("({})", root.path.display()).dimmed()));
    }
    line
}

/// Horizontal rule framing search output
#[must_use]
pub fn rule() -> String {
    "-".repeat(80).dimmed().to_string()
}
