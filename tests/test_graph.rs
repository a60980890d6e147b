#![cfg(feature = "graph")]

use phylodraw::graph::{
    CladeGraph, DEFAULT_EDGE_WEIGHT, EDGE_FORMAT_VERSION, EdgeCapability, to_graph, to_graph_with,
};
use phylodraw::model::{BranchColor, BranchLength, Tree};

/// ((A:0.5,B):2,C:1)
fn small_tree() -> (Tree, [usize; 5]) {
    let mut tree = Tree::new();
    let a = tree.add_leaf("A", Some(BranchLength::new(0.5)));
    let b = tree.add_leaf("B", None);
    let ab = tree.add_clade(&[a, b], Some(BranchLength::new(2.0)));
    let c = tree.add_leaf("C", Some(BranchLength::new(1.0)));
    let root = tree.add_root(&[ab, c]);
    (tree, [a, b, ab, c, root])
}

#[test]
fn test_one_node_per_clade_one_edge_per_branch() {
    let (mut tree, [a, _, ab, _, root]) = small_tree();
    let graph = to_graph(&mut tree);

    assert!(graph.is_directed());
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.node(a).unwrap().name.as_deref(), Some("A"));
    assert_eq!(graph.node(root).unwrap().name, None);
    assert_eq!(graph.node(ab).unwrap().index, ab);
}

#[test]
fn test_edge_weights_default_to_one() {
    let (mut tree, [a, b, ab, c, root]) = small_tree();
    let graph = to_graph(&mut tree);

    assert_eq!(graph.edge(ab, a).unwrap().weight, Some(0.5));
    assert_eq!(graph.edge(ab, b).unwrap().weight, Some(1.0));
    assert_eq!(graph.edge(root, ab).unwrap().weight, Some(2.0));
    assert_eq!(graph.edge(root, c).unwrap().weight, Some(1.0));
    // Directed from parent to child only
    assert!(graph.edge(a, ab).is_none());
}

#[test]
fn test_zero_branch_length_weighs_one() {
    let mut tree = Tree::new();
    let a = tree.add_leaf("A", Some(BranchLength::new(0.0)));
    let b = tree.add_leaf("B", Some(BranchLength::new(0.25)));
    let root = tree.add_root(&[a, b]);
    let graph = to_graph(&mut tree);

    assert_eq!(graph.edge(root, a).unwrap().weight, Some(DEFAULT_EDGE_WEIGHT));
    assert_eq!(graph.edge(root, b).unwrap().weight, Some(0.25));
}

#[test]
fn test_edges_in_preorder() {
    let (mut tree, [a, b, ab, c, root]) = small_tree();
    let pairs: Vec<_> = to_graph(&mut tree)
        .edges()
        .into_iter()
        .map(|(p, c, _)| (p, c))
        .collect();
    assert_eq!(pairs, vec![(root, ab), (root, c), (ab, a), (ab, b)]);
}

#[test]
fn test_unrooted_tree_gives_undirected_graph() {
    let (tree, [a, _, ab, _, _]) = small_tree();
    let mut tree = tree.with_rooted(false);
    let graph = to_graph(&mut tree);

    assert!(matches!(graph, CladeGraph::Undirected(_)));
    assert!(!graph.is_directed());
    assert!(graph.edge(a, ab).is_some());
}

#[test]
fn test_attributed_edges_cascade() {
    let (mut tree, [a, b, ab, c, root]) = small_tree();
    let green = BranchColor::from_rgb(0, 128, 0);
    tree[root].set_color(Some(green));
    tree[ab].set_width(Some(3.0));
    let graph = to_graph(&mut tree);

    assert_eq!(graph.edge(root, c).unwrap().color, Some(green));
    assert_eq!(graph.edge(ab, a).unwrap().color, Some(green));
    assert_eq!(graph.edge(ab, b).unwrap().width, Some(3.0));
    assert_eq!(graph.edge(root, c).unwrap().width, None);
    // Written into the tree
    assert_eq!(tree[b].color(), Some(green));
}

#[test]
fn test_weight_only_and_bare_edges() {
    let (mut tree, [a, _, ab, _, root]) = small_tree();
    tree[root].set_color(Some(BranchColor::from_rgb(1, 2, 3)));

    let graph = to_graph_with(&mut tree, EdgeCapability::WeightOnly);
    let attrs = graph.edge(ab, a).unwrap();
    assert_eq!(attrs.weight, Some(0.5));
    assert_eq!(attrs.color, None);
    // No cascading without attributes
    assert_eq!(tree[a].color(), None);

    let graph = to_graph_with(&mut tree, EdgeCapability::Bare);
    let attrs = graph.edge(ab, a).unwrap();
    assert_eq!(attrs.weight, None);
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_detect_capability() {
    assert_eq!(EdgeCapability::detect("1.0"), EdgeCapability::Attributed);
    assert_eq!(EdgeCapability::detect("3.2"), EdgeCapability::Attributed);
    assert_eq!(EdgeCapability::detect("10.1"), EdgeCapability::Attributed);
    assert_eq!(EdgeCapability::detect("0.99"), EdgeCapability::WeightOnly);
    assert_eq!(EdgeCapability::detect("0.36"), EdgeCapability::Bare);
    assert_eq!(EdgeCapability::default(), EdgeCapability::Attributed);
    assert_eq!(
        EdgeCapability::detect(EDGE_FORMAT_VERSION),
        EdgeCapability::Attributed
    );
}

#[test]
fn test_single_and_empty_tree() {
    let mut single = Tree::single("A");
    let graph = to_graph(&mut single);
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);

    let mut empty = Tree::new();
    let graph = to_graph(&mut empty);
    assert_eq!(graph.node_count(), 0);
}
