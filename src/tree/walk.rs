//! Depth-first traversal shared by display, search and cleanup
//!
//! [`walk`] threads a value top-down (each node derives its own value from
//! its parent's) and folds values bottom-up (each node combines its
//! children's results once all of them have been visited).

use std::vec::IntoIter;

use super::Node;

/// Walk `node` and its descendants.
///
/// `down(node, parent_value)` runs in pre-order; the root receives `init` as
/// its parent value and every child receives the value its parent returned.
/// `up(child_values)` runs in post-order with the results of the children in
/// name order; the root's result is returned.
///
/// ```
/// use tagtree::tree::{Node, walk};
///
/// let mut root = Node::new("/r", Vec::new());
/// root.children.insert("a".into(), Node::new("/r/a", Vec::new()));
///
/// let deepest = walk(&root, |_, depth: &usize| depth + 1, 0, |children| {
///     children.max().unwrap_or(0) + 1
/// });
/// assert_eq!(deepest, 2);
/// ```
pub fn walk<'a, D, U, F, G>(node: &'a Node, mut down: F, init: D, mut up: G) -> U
where
    F: FnMut(&'a Node, &D) -> D,
    G: FnMut(IntoIter<U>) -> U,
{
    visit(node, &mut down, &init, &mut up)
}

/// Walk for top-down side effects only; child results are discarded.
pub fn walk_down<'a, D, F>(node: &'a Node, down: F, init: D)
where
    F: FnMut(&'a Node, &D) -> D,
{
    walk(node, down, init, |children| children.for_each(drop));
}

fn visit<'a, D, U, F, G>(node: &'a Node, down: &mut F, parent: &D, up: &mut G) -> U
where
    F: FnMut(&'a Node, &D) -> D,
    G: FnMut(IntoIter<U>) -> U,
{
    let value = down(node, parent);
    let results: Vec<U> = node
        .children
        .values()
        .map(|child| visit(child, down, &value, up))
        .collect();
    up(results.into_iter())
}
