//! Binary tree node shapes produced by the builders.
//!
//! Children are exclusively owned (`Option<Box<_>>`): no sharing, no cycles.
//! Consumers only read through [`BinaryNode`].

use std::fmt;

use crate::domain::level_order::{build_level_order, encode_level_order, to_level_order};

/// Read-only view over a binary tree node, shared by both node shapes.
pub trait BinaryNode {
    type Item;

    /// Payload (level-order trees) or key (balanced trees).
    fn item(&self) -> &Self::Item;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;

    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

/// Whether a position in the tree holds a node.
pub fn is_present<N: BinaryNode>(node: Option<&N>) -> bool {
    node.is_some()
}

/// Node of a tree rebuilt from a level-order encoding.
///
/// Equality, cloning, formatting and dropping all walk the tree with an
/// explicit worklist, so chains of any height are safe.
pub struct PlainNode<V> {
    pub(crate) value: V,
    pub(crate) left: Option<Box<PlainNode<V>>>,
    pub(crate) right: Option<Box<PlainNode<V>>>,
}

impl<V> PlainNode<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn payload(&self) -> &V {
        &self.value
    }

    pub fn left(&self) -> Option<&PlainNode<V>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&PlainNode<V>> {
        self.right.as_deref()
    }
}

// Level-order input may encode arbitrarily tall chains, so release children
// with an explicit worklist instead of recursive drop glue.
impl<V> Drop for PlainNode<V> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<PlainNode<V>>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<V: PartialEq> PartialEq for PlainNode<V> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.value != b.value {
                return false;
            }
            for pair in [(a.left(), b.left()), (a.right(), b.right())] {
                match pair {
                    (Some(x), Some(y)) => pending.push((x, y)),
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl<V: Eq> Eq for PlainNode<V> {}

impl<V: Clone> Clone for PlainNode<V> {
    fn clone(&self) -> Self {
        match build_level_order(to_level_order(Some(self))) {
            Some(root) => *root,
            // An encoding that starts at a present node always rebuilds one.
            None => PlainNode::new(self.value.clone()),
        }
    }
}

/// Formats as the level-order encoding, e.g. `PlainNode([Some(1), None, Some(2)])`.
impl<V: fmt::Debug> fmt::Debug for PlainNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainNode")
            .field(&encode_level_order(Some(self), |n| n.payload()))
            .finish()
    }
}

impl<V> BinaryNode for PlainNode<V> {
    type Item = V;

    fn item(&self) -> &V {
        &self.value
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Node of a height-balanced binary search tree.
///
/// `height` is 1 for a leaf and `1 + max(left, right)` otherwise, with an
/// absent child counting as 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancedNode<K> {
    pub(crate) key: K,
    pub(crate) left: Option<Box<BalancedNode<K>>>,
    pub(crate) right: Option<Box<BalancedNode<K>>>,
    pub(crate) height: usize,
}

impl<K> BalancedNode<K> {
    pub fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn left(&self) -> Option<&BalancedNode<K>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&BalancedNode<K>> {
        self.right.as_deref()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(self.left()).max(height(self.right()));
    }
}

impl<K> BinaryNode for BalancedNode<K> {
    type Item = K;

    fn item(&self) -> &K {
        &self.key
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Stored height of a subtree; an absent subtree has height 0.
pub fn height<K>(node: Option<&BalancedNode<K>>) -> usize {
    node.map_or(0, |n| n.height)
}

/// `height(left) - height(right)`.
pub fn balance_factor<K>(node: &BalancedNode<K>) -> isize {
    height(node.left()) as isize - height(node.right()) as isize
}
