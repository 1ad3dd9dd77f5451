//! Tests for depth-first queries and breadth-first enumeration

use std::collections::HashSet;

use qtree::QuadTree;
use rstest::rstest;

//      1
//    / | \
//   2  4  5
//   |     |
//   3     6
//         |
//         7
fn seven_node_tree() -> QuadTree<i32> {
    let mut tree = QuadTree::with_content(1);
    let root = tree.root_id();
    let two = tree.new_node(root, Some(2)).unwrap();
    tree.new_node(two, Some(3)).unwrap();
    tree.new_node(root, Some(4)).unwrap();
    let five = tree.new_node(root, Some(5)).unwrap();
    let six = tree.new_node(five, Some(6)).unwrap();
    tree.new_node(six, Some(7)).unwrap();
    tree
}

//        1
//      /   \
//     2     3
//     |   / | | \
//    48  5  6 7  8
//                |
//                24
fn nine_node_tree() -> QuadTree<i32> {
    let mut tree = QuadTree::with_content(1);
    let root = tree.root_id();
    let two = tree.new_node(root, Some(2)).unwrap();
    let three = tree.new_node(root, Some(3)).unwrap();
    for value in [5, 6, 7] {
        tree.new_node(three, Some(value)).unwrap();
    }
    let eight = tree.new_node(three, Some(8)).unwrap();
    tree.new_node(eight, Some(24)).unwrap();
    tree.new_node(two, Some(48)).unwrap();
    tree
}

// ============================================================
// SelectFirstOrDefault
// ============================================================

#[rstest]
#[case(6, 6)]
#[case(7, 7)]
#[case(1, 1)]
#[case(90, 0)]
#[case(123, 0)]
#[case(-4, 0)]
fn given_seven_node_tree_when_select_first_or_default_then_match_or_zero(
    #[case] wanted: i32,
    #[case] expected: i32,
) {
    let tree = seven_node_tree();
    assert_eq!(
        tree.root().select_first_or_default(|&x| x == wanted),
        expected
    );
}

#[test]
fn given_predicate_accepting_default_when_select_first_or_default_then_default_shadows_later_match() {
    // root(1) -> [2, 5]: the subtree at 2 has no match and reports 0, which
    // the predicate accepts, so 5 is never reached.
    let mut tree = QuadTree::with_content(1);
    let root = tree.root_id();
    tree.new_node(root, Some(2)).unwrap();
    tree.new_node(root, Some(5)).unwrap();

    let predicate = |&x: &i32| x == 0 || x == 5;

    assert_eq!(tree.root().select_first_or_default(predicate), 0);
    assert_eq!(tree.root().select_first(predicate), Some(&5));
}

#[test]
fn given_deep_chain_when_select_first_or_default_then_no_stack_overflow() {
    // 1 -> 2 -> ... -> 100_000
    let depth = 100_000;
    let mut tree = QuadTree::with_content(1);
    let mut tip = tree.root_id();
    for value in 2..=depth {
        tip = tree.new_node(tip, Some(value)).unwrap();
    }
    let root = tree.root();

    assert_eq!(root.select_first_or_default(|&x| x == depth), depth);
    assert_eq!(root.select_first_or_default(|&x| x == 0 || x == depth), depth);
    assert_eq!(root.select_first_or_default(|&x| x > depth), 0);
    assert_eq!(root.breadth_first().count(), depth as usize);
}

#[test]
fn given_no_zero_content_when_selecting_zero_then_default_is_indistinguishable() {
    let tree = seven_node_tree();

    assert_eq!(tree.root().select_first_or_default(|&x| x == 0), 0);
    assert_eq!(tree.root().select_first(|&x| x == 0), None);
}

#[test]
fn given_contentless_nodes_when_selecting_then_they_never_match() {
    let mut tree: QuadTree<i32> = QuadTree::new(None);
    let root = tree.root_id();
    let hole = tree.new_node(root, None).unwrap();
    tree.new_node(hole, Some(3)).unwrap();

    assert_eq!(tree.root().select_first(|_| true), Some(&3));
    assert_eq!(tree.root().select_first_or_default(|&x| x > 2), 3);
}

// ============================================================
// Where
// ============================================================

#[test]
fn given_single_root_when_where_equal_one_then_yields_root() {
    let tree = QuadTree::with_content(1);
    let items: Vec<i32> = tree.root().select_where(|&x| x == 1).copied().collect();
    assert_eq!(items, vec![1]);

    let items: Vec<i32> = tree.root().select_where(|&x| x > 0).copied().collect();
    assert_eq!(items, vec![1]);
}

#[test]
fn given_root_with_children_when_where_positive_then_yields_all() {
    let mut tree = QuadTree::with_content(1);
    let root = tree.root_id();
    tree.new_node(root, Some(2)).unwrap();
    tree.new_node(root, Some(3)).unwrap();

    let items: HashSet<i32> = tree.root().select_where(|&x| x > 0).copied().collect();
    assert_eq!(items, HashSet::from([1, 2, 3]));
}

#[test]
fn given_nine_node_tree_when_where_greater_than_seven_then_exactly_three() {
    let tree = nine_node_tree();

    let items: Vec<i32> = tree.root().select_where(|&x| x > 7).copied().collect();

    assert_eq!(items.len(), 3);
    assert!(items.contains(&8));
    assert!(items.contains(&24));
    assert!(items.contains(&48));
    assert!(!items.contains(&7));
    assert!(!items.contains(&1));
}

#[test]
fn given_subtree_view_when_where_then_only_descendants_are_searched() {
    let tree = nine_node_tree();
    let three = tree.root().child(1).unwrap();

    let items: Vec<i32> = three.select_where(|&x| x > 7).copied().collect();

    assert_eq!(items, vec![8, 24]);
}

// ============================================================
// BreadthFirst / NodeLevels
// ============================================================

#[test]
fn given_empty_node_when_breadth_first_then_yields_nothing() {
    let tree: QuadTree<i32> = QuadTree::default();
    assert_eq!(tree.root().breadth_first().count(), 0);
}

#[test]
fn given_contentless_root_with_child_when_breadth_first_then_yields_none_first() {
    let mut tree: QuadTree<i32> = QuadTree::default();
    let root = tree.root_id();
    tree.new_node(root, Some(4)).unwrap();

    let items: Vec<Option<&i32>> = tree.root().breadth_first().collect();
    assert_eq!(items, vec![None, Some(&4)]);
}

#[rstest]
#[case(seven_node_tree(), vec![1, 2, 4, 5, 3, 6, 7])]
#[case(nine_node_tree(), vec![1, 2, 3, 48, 5, 6, 7, 8, 24])]
fn given_tree_when_breadth_first_then_level_order_without_gaps(
    #[case] tree: QuadTree<i32>,
    #[case] expected: Vec<i32>,
) {
    let items: Vec<i32> = tree.root().breadth_first().flatten().copied().collect();

    assert_eq!(items.len(), tree.root().count());
    assert_eq!(items, expected);
}

#[test]
fn given_tree_when_breadth_first_twice_then_independent_traversals() {
    let tree = nine_node_tree();
    let root = tree.root();

    let mut first = root.breadth_first();
    let head: Vec<Option<&i32>> = first.by_ref().take(3).collect();
    let restarted: Vec<Option<&i32>> = root.breadth_first().collect();
    let rest: Vec<Option<&i32>> = first.collect();

    assert_eq!(head, vec![Some(&1), Some(&2), Some(&3)]);
    assert_eq!(restarted.len(), 9);
    assert_eq!(rest.len(), 6);
    assert_eq!(restarted[3..], rest[..]);
}

#[test]
fn given_nine_node_tree_when_getting_levels_then_grouped_by_depth() {
    let tree = nine_node_tree();
    let levels = tree.root().node_levels();

    let contents: Vec<Vec<i32>> = levels
        .iter()
        .map(|level| level.iter().filter_map(|n| n.content().copied()).collect())
        .collect();
    assert_eq!(
        contents,
        vec![vec![1], vec![2, 3], vec![48, 5, 6, 7, 8], vec![24]]
    );
    assert_eq!(levels[0][0], tree.root());
    assert_eq!(levels.len(), tree.depth());
}

#[test]
fn given_empty_node_when_getting_levels_then_single_level_with_self() {
    let tree: QuadTree<i32> = QuadTree::default();
    let levels = tree.root().node_levels();

    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0], vec![tree.root()]);
}
