use phylodraw::layout::{
    GridLayout, TreeLayout, col_positions, fudge_margin, row_positions, x_positions, y_positions,
};
use phylodraw::model::{BranchLength, CladeIndex, Tree};

/// ((A:0.1,B:0.2):0.3,(C:0.4,D:0.5,E:0.6):0.7,F:1.2)
fn mixed_tree() -> (Tree, Vec<CladeIndex>) {
    let mut tree = Tree::new();
    let a = tree.add_leaf("A", Some(BranchLength::new(0.1)));
    let b = tree.add_leaf("B", Some(BranchLength::new(0.2)));
    let ab = tree.add_clade(&[a, b], Some(BranchLength::new(0.3)));
    let c = tree.add_leaf("C", Some(BranchLength::new(0.4)));
    let d = tree.add_leaf("D", Some(BranchLength::new(0.5)));
    let e = tree.add_leaf("E", Some(BranchLength::new(0.6)));
    let cde = tree.add_clade(&[c, d, e], Some(BranchLength::new(0.7)));
    let f = tree.add_leaf("F", Some(BranchLength::new(1.2)));
    let root = tree.add_root(&[ab, cde, f]);
    (tree, vec![a, b, ab, c, d, e, cde, f, root])
}

#[test]
fn test_root_depth_zero_and_monotonic() {
    let (tree, _) = mixed_tree();
    let x = x_positions(&tree);
    assert_eq!(x[tree.root_index()], 0.0);
    for clade in tree.pre_order_iter() {
        if let Some(parent) = clade.parent() {
            assert!(x[clade.index()] >= x[parent]);
        }
    }
}

#[test]
fn test_depths_are_cumulative_branch_lengths() {
    let (tree, idx) = mixed_tree();
    let x = x_positions(&tree);
    assert!((x[idx[0]] - 0.4).abs() < 1e-12);
    assert!((x[idx[5]] - 1.3).abs() < 1e-12);
    assert!((x[idx[7]] - 1.2).abs() < 1e-12);
}

#[test]
fn test_unit_depth_fallback() {
    // root -> (A -> (A1, A2), B), no branch lengths at all
    let mut tree = Tree::new();
    let a1 = tree.add_leaf("A1", None);
    let a2 = tree.add_leaf("A2", None);
    let a = tree.add_clade(&[a1, a2], None);
    let b = tree.add_leaf("B", None);
    let root = tree.add_root(&[a, b]);

    let x = x_positions(&tree);
    assert_eq!(x[root], 0.0);
    assert_eq!(x[a], 1.0);
    assert_eq!(x[a1], 2.0);
    assert_eq!(x[a2], 2.0);
    assert_eq!(x[b], 1.0);
}

#[test]
fn test_unit_depth_fallback_with_zero_lengths() {
    let mut tree = Tree::new();
    let a = tree.add_leaf("A", Some(BranchLength::new(0.0)));
    let b = tree.add_leaf("B", Some(BranchLength::new(0.0)));
    let root = tree.add_root(&[a, b]);

    let x = x_positions(&tree);
    assert_eq!(x[root], 0.0);
    assert_eq!(x[a], 1.0);
    assert_eq!(x[b], 1.0);
}

#[test]
fn test_tip_heights_in_traversal_order() {
    let (tree, _) = mixed_tree();
    let y = y_positions(&tree);
    let tips: Vec<f64> = tree.terminals().iter().map(|&t| y[t]).collect();
    assert_eq!(tips, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_internal_height_is_first_last_midpoint() {
    let (tree, idx) = mixed_tree();
    let y = y_positions(&tree);
    for clade in tree.pre_order_iter() {
        if let (Some(first), Some(last)) = (clade.first_child(), clade.last_child()) {
            assert_eq!(y[clade.index()], (y[first] + y[last]) / 2.0);
        }
    }
    // Middle child D does not pull its parent
    assert_eq!(y[idx[6]], 4.0);
    // Root spans AB (1.5) and F (6)
    assert_eq!(y[idx[8]], 3.75);
}

#[test]
fn test_layout_is_deterministic() {
    let (tree, _) = mixed_tree();
    assert_eq!(TreeLayout::new(&tree), TreeLayout::new(&tree));
    assert_eq!(GridLayout::new(&tree, 60), GridLayout::new(&tree, 60));
}

#[test]
fn test_tree_layout_extremes() {
    let (tree, _) = mixed_tree();
    let layout = TreeLayout::new(&tree);
    assert!((layout.max_x() - 1.3).abs() < 1e-12);
    assert_eq!(layout.max_y(), 6.0);
    assert_eq!(layout.xs().len(), tree.num_clades());
    assert_eq!(layout.ys().len(), tree.num_clades());
}

#[test]
fn test_single_clade_layout() {
    let tree = Tree::single("A");
    let layout = TreeLayout::new(&tree);
    assert_eq!(layout.x(0), 0.0);
    assert_eq!(layout.y(0), 1.0);
    assert_eq!(col_positions(&tree, 10), vec![1]);
    assert_eq!(row_positions(&tree), vec![0]);
}

#[test]
fn test_fudge_margin() {
    assert_eq!(fudge_margin(1), 0);
    assert_eq!(fudge_margin(2), 1);
    assert_eq!(fudge_margin(4), 2);
    assert_eq!(fudge_margin(5), 3);
    assert_eq!(fudge_margin(129), 8);
}

#[test]
fn test_grid_rows_use_integer_midpoint() {
    // (A,(B,C)): B=2, C=4 -> BC=3; root spans A=0 and BC=3 -> 1
    let mut tree = Tree::new();
    let a = tree.add_leaf("A", None);
    let b = tree.add_leaf("B", None);
    let c = tree.add_leaf("C", None);
    let bc = tree.add_clade(&[b, c], None);
    let root = tree.add_root(&[a, bc]);

    let rows = row_positions(&tree);
    assert_eq!(rows[a], 0);
    assert_eq!(rows[b], 2);
    assert_eq!(rows[c], 4);
    assert_eq!(rows[bc], 3);
    assert_eq!(rows[root], 1);

    // Real-valued layout keeps the half
    let y = y_positions(&tree);
    assert_eq!(y[root], 1.75);
}

#[test]
fn test_grid_columns_scale_depths() {
    // ((A:1,B:1):1,(C:1,D:1):1), 78 columns, fudge 2 -> 38 per unit
    let mut tree = Tree::new();
    let a = tree.add_leaf("A", Some(BranchLength::new(1.0)));
    let b = tree.add_leaf("B", Some(BranchLength::new(1.0)));
    let ab = tree.add_clade(&[a, b], Some(BranchLength::new(1.0)));
    let c = tree.add_leaf("C", Some(BranchLength::new(1.0)));
    let d = tree.add_leaf("D", Some(BranchLength::new(1.0)));
    let cd = tree.add_clade(&[c, d], Some(BranchLength::new(1.0)));
    let root = tree.add_root(&[ab, cd]);

    let grid = GridLayout::new(&tree, 78);
    assert_eq!(grid.col(root), 1);
    assert_eq!(grid.col(ab), 39);
    assert_eq!(grid.col(d), 77);
    assert_eq!(grid.max_col(), 77);
    assert_eq!(grid.row(root), 3);
}
