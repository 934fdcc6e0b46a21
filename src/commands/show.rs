//! Show command - print cached trees

use std::path::Path;

use crate::{
    TagtreeError,
    cache::CacheStore,
    output,
    tree::{Node, walk_down},
};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the show command
///
/// # Errors
/// Returns an error if `root` is given but not cached
pub fn execute(store: &CacheStore, root: Option<&Path>, quiet: bool) -> Result<()> {
    let tops = store.tops(root)?;
    if tops.is_empty() && !quiet {
        println!("No roots indexed yet.");
    }

    for top in tops {
        for line in render(top) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Lines of a tree, parents before children, indented by depth
#[must_use]
pub fn render(top: &Node) -> Vec<String> {
    let mut lines = Vec::new();
    walk_down(
        top,
        |node, depth: &usize| {
            lines.push(output::tree_line(node, *depth));
            depth + 1
        },
        0,
    );
    lines
}
