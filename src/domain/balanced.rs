//! AVL construction by repeated single-key insertion.
//!
//! Every call to [`insert`] rebalances on the way back up, so the tree is
//! height-balanced after each insertion, not only at the end of a batch.

use tracing::{instrument, trace};

use crate::domain::node::{balance_factor, BalancedNode};

type Link<K> = Option<Box<BalancedNode<K>>>;

/// Which child a key is routed to: `<` goes left, `>=` goes right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn route<K: Ord>(key: &K, node_key: &K) -> Self {
        if key < node_key {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Build an AVL tree from `keys` in input order, skipping absent entries.
///
/// Returns `None` when no key is present.
#[instrument(level = "debug", skip_all, fields(len = keys.len()))]
pub fn build_balanced<K: Ord>(keys: Vec<Option<K>>) -> Option<Box<BalancedNode<K>>> {
    keys.into_iter()
        .flatten()
        .fold(None, |root, key| Some(insert(root, key)))
}

/// Insert `key` below `root` and return the (possibly new) subtree root.
///
/// Equal keys are kept and routed right.
pub fn insert<K: Ord>(root: Link<K>, key: K) -> Box<BalancedNode<K>> {
    let Some(mut node) = root else {
        return Box::new(BalancedNode::leaf(key));
    };

    let side = Side::route(&key, &node.key);
    // The single/double rotation choice compares the inserted key with the
    // immediate child's key. An imbalance here implies no rotation happened
    // below, so the child seen on the way down is still the child afterwards.
    let child_side = match side {
        Side::Left => node.left.as_ref(),
        Side::Right => node.right.as_ref(),
    }
    .map(|child| Side::route(&key, &child.key));

    match side {
        Side::Left => node.left = Some(insert(node.left.take(), key)),
        Side::Right => node.right = Some(insert(node.right.take(), key)),
    }
    node.update_height();

    let balance = balance_factor(&node);
    match (balance, child_side) {
        (b, Some(Side::Left)) if b > 1 => {
            trace!("left-left case");
            right_rotate(node)
        }
        (b, Some(Side::Right)) if b < -1 => {
            trace!("right-right case");
            left_rotate(node)
        }
        (b, Some(Side::Right)) if b > 1 => {
            trace!("left-right case");
            node.left = node.left.take().map(left_rotate);
            right_rotate(node)
        }
        (b, Some(Side::Left)) if b < -1 => {
            trace!("right-left case");
            node.right = node.right.take().map(right_rotate);
            left_rotate(node)
        }
        _ => node,
    }
}

/// Rotate `z` left around its right child and return the new local root.
///
/// A node without a right child is returned unchanged.
pub fn left_rotate<K>(mut z: Box<BalancedNode<K>>) -> Box<BalancedNode<K>> {
    let Some(mut y) = z.right.take() else {
        return z;
    };
    z.right = y.left.take();
    z.update_height();
    y.left = Some(z);
    y.update_height();
    y
}

/// Rotate `z` right around its left child and return the new local root.
///
/// A node without a left child is returned unchanged.
pub fn right_rotate<K>(mut z: Box<BalancedNode<K>>) -> Box<BalancedNode<K>> {
    let Some(mut y) = z.left.take() else {
        return z;
    };
    z.left = y.right.take();
    z.update_height();
    y.right = Some(z);
    y.update_height();
    y
}

/// Check the AVL invariant everywhere below `root`.
///
/// Besides `|balance| <= 1`, every stored height must match the height
/// recomputed from the children.
pub fn is_avl_balanced<K>(root: Option<&BalancedNode<K>>) -> bool {
    // Post-order walk computing real heights: (node, children_done).
    let mut stack = Vec::new();
    let mut heights: Vec<usize> = Vec::new();
    if let Some(root) = root {
        stack.push((root, false));
    }
    while let Some((node, done)) = stack.pop() {
        if !done {
            stack.push((node, true));
            if let Some(left) = node.left() {
                stack.push((left, false));
            }
            if let Some(right) = node.right() {
                stack.push((right, false));
            }
            continue;
        }
        // The right subtree finishes first, so the left height is on top.
        let left = if node.left().is_some() { heights.pop().unwrap_or(0) } else { 0 };
        let right = if node.right().is_some() { heights.pop().unwrap_or(0) } else { 0 };
        let actual = 1 + left.max(right);
        if left.abs_diff(right) > 1 || actual != node.height() {
            return false;
        }
        heights.push(actual);
    }
    true
}
