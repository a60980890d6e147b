//! Tree-to-coordinate layout shared by all renderers.
//!
//! Two independent mappings are computed per render call, each stored as a
//! vector parallel to the tree's clade arena (indexed by [CladeIndex]):
//! - **Depth (x)**: cumulative branch length from the root, see [x_positions].
//! - **Height (y)**: tips evenly spaced in traversal order, every internal
//!   clade at the midpoint of its *first* and *last* child, see [y_positions].
//!   Middle children do not influence their parent's height.
//!
//! The ASCII renderer quantizes both into character columns and rows
//! ([col_positions], [row_positions]); the row midpoint there uses integer
//! division while the vector layout averages real values.
//!
//! Nothing is cached: calling a layout function twice on the same tree
//! yields identical vectors.

use crate::model::{CladeIndex, Tree};
use tracing::debug;

// =#========================================================================#=
// REAL-VALUED LAYOUT
// =#========================================================================#=
/// Positions of all clades for vector drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TreeLayout {
    /// Computes depth and height positions for every clade of `tree`.
    pub fn new(tree: &Tree) -> Self {
        TreeLayout {
            x: x_positions(tree),
            y: y_positions(tree),
        }
    }

    /// Returns the horizontal (depth) position of a clade.
    pub fn x(&self, index: CladeIndex) -> f64 {
        self.x[index]
    }

    /// Returns the vertical (height) position of a clade.
    pub fn y(&self, index: CladeIndex) -> f64 {
        self.y[index]
    }

    /// Returns the largest depth, 0 for an empty tree.
    pub fn max_x(&self) -> f64 {
        max_of(&self.x)
    }

    /// Returns the largest height, 0 for an empty tree.
    pub fn max_y(&self) -> f64 {
        max_of(&self.y)
    }

    /// Returns all depths, parallel to the clade arena.
    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    /// Returns all heights, parallel to the clade arena.
    pub fn ys(&self) -> &[f64] {
        &self.y
    }
}

/// Returns the horizontal position of every clade.
///
/// Uses the branch-length depths of the tree. If these are degenerate
/// (maximum depth exactly 0, e.g. no branch lengths at all), falls back to
/// unit branch lengths, so that depth counts edges from the root.
pub fn x_positions(tree: &Tree) -> Vec<f64> {
    let depths = tree.depths(false);
    if max_of(&depths) == 0.0 {
        debug!("no branch lengths, falling back to unit depths");
        return tree.depths(true);
    }
    depths
}

/// Returns the vertical position of every clade.
///
/// Tips get `1, 2, ..., n` in traversal order (the first tip is topmost once
/// the vertical axis is drawn inverted). Internal clades get the mean of
/// their first and last child's position, computed in post-order. A single
/// clade tree has only its tip position.
pub fn y_positions(tree: &Tree) -> Vec<f64> {
    let terminals = tree.terminals();
    let count = terminals.len();
    let mut heights = vec![0.0; tree.num_clades()];

    for (i, &tip) in terminals.iter().rev().enumerate() {
        heights[tip] = (count - i) as f64;
    }

    for clade in tree.post_order_iter() {
        if let (Some(first), Some(last)) = (clade.first_child(), clade.last_child()) {
            heights[clade.index()] = (heights[first] + heights[last]) / 2.0;
        }
    }

    heights
}

// =#========================================================================#=
// CHARACTER GRID LAYOUT
// =#========================================================================#=
/// Positions of all clades in a character grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    cols: Vec<usize>,
    rows: Vec<usize>,
}

impl GridLayout {
    /// Computes column and row positions for a drawing `drawing_width` characters wide.
    pub fn new(tree: &Tree, drawing_width: usize) -> Self {
        GridLayout {
            cols: col_positions(tree, drawing_width),
            rows: row_positions(tree),
        }
    }

    /// Returns the column of a clade.
    pub fn col(&self, index: CladeIndex) -> usize {
        self.cols[index]
    }

    /// Returns the row of a clade.
    pub fn row(&self, index: CladeIndex) -> usize {
        self.rows[index]
    }

    /// Returns the largest column used.
    pub fn max_col(&self) -> usize {
        self.cols.iter().copied().max().unwrap_or(0)
    }
}

/// Returns the number of columns reserved for rounding overflow:
/// one per tree layer of a balanced tree, i.e. `ceil(log2(num_terminals))`.
pub fn fudge_margin(num_terminals: usize) -> usize {
    if num_terminals <= 1 {
        return 0;
    }
    (num_terminals as f64).log2().ceil() as usize
}

/// Returns the character column of every clade.
///
/// Depths (see [x_positions]) are scaled by
/// `(drawing_width - fudge_margin) / max_depth` and shifted by one column,
/// then truncated. If the maximal depth is 0 (single clade), every clade is
/// put into column 1.
pub fn col_positions(tree: &Tree, drawing_width: usize) -> Vec<usize> {
    let depths = x_positions(tree);
    let max_depth = max_of(&depths);
    let usable = drawing_width.saturating_sub(fudge_margin(tree.count_terminals()));
    let cols_per_branch_unit = if max_depth > 0.0 {
        usable as f64 / max_depth
    } else {
        0.0
    };

    depths
        .iter()
        .map(|depth| (depth * cols_per_branch_unit + 1.0) as usize)
        .collect()
}

/// Returns the character row of every clade.
///
/// Tips are put on every other row (`0, 2, 4, ...`) to leave room for
/// connectors; internal clades on the integer midpoint of their first and
/// last child's row.
pub fn row_positions(tree: &Tree) -> Vec<usize> {
    let mut rows = vec![0; tree.num_clades()];

    for (i, tip) in tree.terminals().into_iter().enumerate() {
        rows[tip] = 2 * i;
    }

    for clade in tree.post_order_iter() {
        if let (Some(first), Some(last)) = (clade.first_child(), clade.last_child()) {
            rows[clade.index()] = (rows[first] + rows[last]) / 2;
        }
    }

    rows
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}
