/*
Text rendering of built trees via termtree.

Absent children are only shown when the sibling exists; otherwise a node with
a single child could not tell left from right.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::node::BinaryNode;

pub const ABSENT_MARK: &str = "∅";
pub const EMPTY_TREE: &str = "Empty tree";

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<N> TreeDisplay for Option<&N>
where
    N: BinaryNode,
    N::Item: std::fmt::Display,
{
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        render_tree(*self, |n| n.item().to_string())
    }
}

/// Render with a custom node label.
pub fn render_tree<N, F>(root: Option<&N>, label: F) -> Tree<String>
where
    N: BinaryNode,
    F: Fn(&N) -> String,
{
    let Some(root) = root else {
        return Tree::new(EMPTY_TREE.to_string());
    };

    // Children are finished before their parent: (node, expanded).
    let mut stack = vec![(root, false)];
    let mut finished: Vec<Tree<String>> = Vec::new();
    while let Some((node, expanded)) = stack.pop() {
        if !expanded {
            stack.push((node, true));
            stack.extend(node.left().map(|l| (l, false)));
            stack.extend(node.right().map(|r| (r, false)));
            continue;
        }
        // The right subtree was popped last-in-first-out before the left one,
        // so the left tree sits on top of `finished`.
        let left = node.left().and_then(|_| finished.pop());
        let right = node.right().and_then(|_| finished.pop());
        let mut tree = Tree::new(label(node));
        match (left, right) {
            (None, None) => {}
            (left, right) => {
                tree.push(left.unwrap_or_else(|| Tree::new(ABSENT_MARK.to_string())));
                tree.push(right.unwrap_or_else(|| Tree::new(ABSENT_MARK.to_string())));
            }
        }
        finished.push(tree);
    }
    finished
        .pop()
        .unwrap_or_else(|| Tree::new(EMPTY_TREE.to_string()))
}
