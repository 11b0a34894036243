//! Read-only traversals over any [`BinaryNode`] tree.
//!
//! All walks keep their own stack or queue; tall level-order trees would
//! overflow a recursive walk.

use std::collections::VecDeque;

use crate::domain::node::BinaryNode;

/// Left, node, right.
pub struct InOrder<'a, N> {
    stack: Vec<&'a N>,
    current: Option<&'a N>,
}

pub fn in_order<N: BinaryNode>(root: Option<&N>) -> InOrder<'_, N> {
    InOrder {
        stack: Vec::new(),
        current: root,
    }
}

impl<'a, N: BinaryNode> Iterator for InOrder<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left();
        }
        let node = self.stack.pop()?;
        self.current = node.right();
        Some(node)
    }
}

/// Breadth-first, left to right, yielding `(depth, node)` with the root at depth 0.
pub struct LevelOrder<'a, N> {
    queue: VecDeque<(usize, &'a N)>,
}

pub fn level_order<N: BinaryNode>(root: Option<&N>) -> LevelOrder<'_, N> {
    LevelOrder {
        queue: root.map(|r| (0, r)).into_iter().collect(),
    }
}

impl<'a, N: BinaryNode> Iterator for LevelOrder<'a, N> {
    type Item = (usize, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.queue.pop_front()?;
        if let Some(left) = node.left() {
            self.queue.push_back((depth + 1, left));
        }
        if let Some(right) = node.right() {
            self.queue.push_back((depth + 1, right));
        }
        Some((depth, node))
    }
}

pub fn node_count<N: BinaryNode>(root: Option<&N>) -> usize {
    level_order(root).count()
}

/// Number of levels; 0 for an empty tree.
pub fn tree_height<N: BinaryNode>(root: Option<&N>) -> usize {
    level_order(root).map(|(depth, _)| depth + 1).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::level_order::build_level_order;
    use crate::domain::node::PlainNode;

    fn sample() -> Option<Box<PlainNode<i32>>> {
        build_level_order(vec![Some(4), Some(2), Some(6), Some(1), Some(3), None, Some(7)])
    }

    #[test]
    fn test_in_order_visits_left_node_right() {
        let root = sample();
        let items: Vec<i32> = in_order(root.as_deref()).map(|n| *n.item()).collect();
        assert_eq!(items, vec![1, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn test_level_order_reports_depths() {
        let root = sample();
        let items: Vec<(usize, i32)> = level_order(root.as_deref())
            .map(|(d, n)| (d, *n.item()))
            .collect();
        assert_eq!(
            items,
            vec![(0, 4), (1, 2), (1, 6), (2, 1), (2, 3), (2, 7)]
        );
    }

    #[test]
    fn test_counts_on_empty_tree() {
        assert_eq!(node_count::<PlainNode<i32>>(None), 0);
        assert_eq!(tree_height::<PlainNode<i32>>(None), 0);
    }

    #[test]
    fn test_height_and_count() {
        let root = sample();
        assert_eq!(node_count(root.as_deref()), 6);
        assert_eq!(tree_height(root.as_deref()), 3);
    }
}
