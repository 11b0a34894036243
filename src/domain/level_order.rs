//! Level-order (breadth-first) reconstruction of arbitrary binary trees.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::domain::node::{BinaryNode, PlainNode};

/// Node under construction; children are indices into the build arena.
struct Slot<V> {
    value: V,
    left: Option<usize>,
    right: Option<usize>,
}

/// Rebuild the tree encoded breadth-first in `values`.
///
/// `None` at position 0 (or an empty input) yields no tree. Elsewhere `None`
/// leaves that child position empty; it still consumes its input slot but is
/// never queued for children of its own. No rebalancing is done: the shape is
/// exactly what the encoding describes.
#[instrument(level = "debug", skip_all, fields(len = values.len()))]
pub fn build_level_order<V>(values: Vec<Option<V>>) -> Option<Box<PlainNode<V>>> {
    let len = values.len();
    let mut input = values.into_iter();
    let root_value = input.next().flatten()?;

    let mut slots = vec![Slot {
        value: root_value,
        left: None,
        right: None,
    }];
    let mut queue = VecDeque::from([0usize]);
    let mut i = 1;

    while i < len {
        let Some(current) = queue.pop_front() else {
            break;
        };
        if i < len {
            slots[current].left = push_child(&mut slots, &mut queue, input.next().flatten());
            i += 1;
        }
        if i < len {
            slots[current].right = push_child(&mut slots, &mut queue, input.next().flatten());
            i += 1;
        }
    }
    debug!(nodes = slots.len(), consumed = i, "level-order slots filled");

    assemble(slots)
}

fn push_child<V>(
    slots: &mut Vec<Slot<V>>,
    queue: &mut VecDeque<usize>,
    value: Option<V>,
) -> Option<usize> {
    let value = value?;
    let idx = slots.len();
    slots.push(Slot {
        value,
        left: None,
        right: None,
    });
    queue.push_back(idx);
    Some(idx)
}

/// Convert the index arena into owned nodes.
///
/// Children are always created after their parent, so walking the arena
/// backwards finishes every subtree before its parent claims it.
fn assemble<V>(slots: Vec<Slot<V>>) -> Option<Box<PlainNode<V>>> {
    let mut links = Vec::with_capacity(slots.len());
    let mut built: Vec<Option<Box<PlainNode<V>>>> = Vec::with_capacity(slots.len());
    for slot in slots {
        links.push((slot.left, slot.right));
        built.push(Some(Box::new(PlainNode::new(slot.value))));
    }

    for idx in (0..built.len()).rev() {
        let (left, right) = links[idx];
        let left = left.and_then(|l| built[l].take());
        let right = right.and_then(|r| built[r].take());
        if let Some(node) = built[idx].as_mut() {
            node.left = left;
            node.right = right;
        }
    }

    built.into_iter().next().flatten()
}

/// Encode a tree breadth-first with explicit absence markers.
///
/// Every present node emits both child slots; trailing markers are trimmed,
/// so `build_level_order(to_level_order(t))` reproduces `t`.
#[instrument(level = "debug", skip_all)]
pub fn to_level_order<V: Clone>(root: Option<&PlainNode<V>>) -> Vec<Option<V>> {
    encode_level_order(root, |n| n.payload().clone())
}

/// Level-order encoding of any node shape, mapping each present node with `f`.
pub fn encode_level_order<'a, N, T, F>(root: Option<&'a N>, f: F) -> Vec<Option<T>>
where
    N: BinaryNode,
    F: Fn(&'a N) -> T,
{
    let mut out = Vec::new();
    let Some(root) = root else {
        return out;
    };

    let mut queue = VecDeque::from([Some(root)]);
    while let Some(slot) = queue.pop_front() {
        match slot {
            Some(node) => {
                out.push(Some(f(node)));
                queue.push_back(node.left());
                queue.push_back(node.right());
            }
            None => out.push(None),
        }
    }

    while matches!(out.last(), Some(None)) {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_tree() {
        assert!(build_level_order::<i32>(vec![]).is_none());
    }

    #[test]
    fn test_absent_root_yields_no_tree() {
        assert!(build_level_order(vec![None, Some(1), Some(2)]).is_none());
    }

    #[test]
    fn test_single_value_yields_leaf() {
        let root = build_level_order(vec![Some("x")]).unwrap();
        assert_eq!(*root.payload(), "x");
        assert!(root.left().is_none());
        assert!(root.right().is_none());
    }

    #[test]
    fn test_absent_slot_is_not_queued() {
        // 1 -> (None, 2); 2 -> (3, 4)
        let root = build_level_order(vec![Some(1), None, Some(2), Some(3), Some(4)]).unwrap();
        assert!(root.left().is_none());
        let right = root.right().unwrap();
        assert_eq!(*right.payload(), 2);
        assert_eq!(*right.left().unwrap().payload(), 3);
        assert_eq!(*right.right().unwrap().payload(), 4);
    }

    #[test]
    fn test_trailing_markers_are_trimmed_on_encode() {
        let root = build_level_order(vec![Some(1), Some(2), None, None, None]).unwrap();
        assert_eq!(to_level_order(Some(&*root)), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_encode_empty_tree() {
        assert!(to_level_order::<u8>(None).is_empty());
    }
}
