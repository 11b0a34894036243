//! Tests for AVL construction

use proptest::prelude::*;
use rstest::rstest;

use treeviz::domain::{
    balance_factor, build_balanced, height, in_order, insert, is_avl_balanced, node_count,
    BalancedNode, BinaryNode,
};
use treeviz::util::testing;

fn keys_of(root: Option<&BalancedNode<i32>>) -> Vec<i32> {
    in_order(root).map(|n| *n.key()).collect()
}

/// Tightest AVL height for `n` nodes: h <= log_phi(sqrt(5) * (n + 2)) - 2,
/// i.e. about 1.44 * log2(n + 2) - 0.328.
fn avl_height_bound(n: usize) -> f64 {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    (5f64.sqrt() * (n as f64 + 2.0)).ln() / phi.ln() - 2.0
}

fn assert_invariants(root: Option<&BalancedNode<i32>>, expected_len: usize) {
    assert!(is_avl_balanced(root), "tree is not AVL balanced");
    let keys = keys_of(root);
    assert_eq!(keys.len(), expected_len);
    assert!(keys.windows(2).all(|w| w[0] <= w[1]), "in-order keys not sorted");
    assert!(height(root) as f64 <= avl_height_bound(expected_len) + 1e-9);
}

// ============================================================
// Rotation cases
// ============================================================

#[rstest]
#[case::left_rotation(vec![10, 20, 30])]
#[case::right_rotation(vec![30, 20, 10])]
#[case::left_right_rotation(vec![30, 10, 20])]
#[case::right_left_rotation(vec![10, 30, 20])]
fn given_three_keys_when_building_then_middle_key_becomes_root(#[case] keys: Vec<i32>) {
    testing::init_test_setup();
    // Act
    let root = build_balanced(keys.into_iter().map(Some).collect()).unwrap();

    // Assert
    assert_eq!(*root.key(), 20);
    assert_eq!(root.left().map(|n| *n.key()), Some(10));
    assert_eq!(root.right().map(|n| *n.key()), Some(30));
    assert_eq!(root.height(), 2);
    assert!(root.left().unwrap().is_leaf());
    assert!(root.right().unwrap().is_leaf());
}

#[test]
fn given_absent_entries_when_building_then_skipped() {
    let root = build_balanced(vec![None, Some(10), None, Some(20), Some(30), None]).unwrap();
    assert_eq!(*root.key(), 20);
    assert_eq!(node_count(Some(&*root)), 3);
}

#[test]
fn given_no_present_keys_when_building_then_no_tree() {
    assert!(build_balanced::<i32>(Vec::new()).is_none());
    assert!(build_balanced::<i32>(vec![None, None, None]).is_none());
}

#[test]
fn given_duplicates_when_building_then_all_retained() {
    let root = build_balanced(vec![Some(5), Some(5), Some(5), Some(5), Some(5)]);
    assert_invariants(root.as_deref(), 5);
}

#[test]
fn given_text_keys_when_building_then_lexicographic_order() {
    let words = ["pear", "apple", "fig", "kiwi", "banana"];
    let root = build_balanced(words.iter().map(|w| Some(w.to_string())).collect());
    let keys: Vec<&str> = in_order(root.as_deref()).map(|n| n.key().as_str()).collect();
    assert_eq!(keys, vec!["apple", "banana", "fig", "kiwi", "pear"]);
}

#[test]
fn given_each_insertion_when_folding_then_balanced_after_every_step() {
    let mut root = None;
    for (i, key) in (0..200).rev().enumerate() {
        root = Some(insert(root, key));
        assert!(is_avl_balanced(root.as_deref()), "unbalanced after insertion {}", i);
        assert!(balance_factor(root.as_deref().unwrap()).abs() <= 1);
    }
}

#[test]
fn given_sorted_sequences_when_building_then_height_is_logarithmic() {
    for n in 1..=1000usize {
        let ascending = build_balanced((0..n as i32).map(Some).collect());
        assert_invariants(ascending.as_deref(), n);

        let descending = build_balanced((0..n as i32).rev().map(Some).collect());
        assert_invariants(descending.as_deref(), n);
    }
}

#[test]
fn given_seven_ascending_keys_when_building_then_perfect_tree() {
    let root = build_balanced((1..=7).map(Some).collect()).unwrap();
    assert_eq!(*root.key(), 4);
    assert_eq!(root.height(), 3);
    assert_eq!(keys_of(Some(&*root)), (1..=7).collect::<Vec<_>>());
}

proptest! {
    #[test]
    fn balanced_tree_invariants_hold_for_random_keys(
        keys in prop::collection::vec(prop::option::weighted(0.9, -500i32..500), 0..1000)
    ) {
        let present = keys.iter().flatten().count();
        let root = build_balanced(keys);
        prop_assert!(is_avl_balanced(root.as_deref()));
        let in_order_keys = keys_of(root.as_deref());
        prop_assert_eq!(in_order_keys.len(), present);
        prop_assert!(in_order_keys.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(height(root.as_deref()) as f64 <= avl_height_bound(present) + 1e-9);
    }
}
