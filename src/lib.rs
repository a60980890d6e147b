//! Phylodraw is a library to draw phylogenetic trees.
//!
//! Three ways of turning a tree into something to look at are offered:
//! - ASCII art: a phylogram of underscores and bars written to any
//!   [Write](std::io::Write), see [crate::ascii].
//! - Vector plots: phylograms drawn vertically, horizontally or around a
//!   circle onto a [Canvas](crate::plot::Canvas); the built-in
//!   [SvgCanvas](crate::plot::SvgCanvas) writes SVG. See [crate::plot].
//! - Graph export: a [petgraph] graph with one node per clade and
//!   branch lengths as edge weights, see [crate::graph] (feature `graph`).
//!
//! Trees are built bottom-up with the arena model of [crate::model].
//! All renderers share the layout of [crate::layout]: depth from cumulative
//! branch lengths (or edge counts, if there are none), tips evenly spaced
//! and internal clades centered between their first and last child.
//!
//! Drawing with colors or widths writes them into the tree: a clade without
//! its own color or width inherits that of its parent.
//!
//! # Usage patterns
//! 1. Quick access with default settings: [draw_ascii] and [draw].
//! 2. Configure [DrawOptions] yourself, or read a
//!    [RenderConfig](crate::config::RenderConfig) from JSON, and use
//!    [draw_on](crate::plot::draw_on) with your own canvas.
//!
//! ## Example
//!
//! ```
//! use phylodraw::model::{BranchLength, Tree};
//! use phylodraw::{DrawOptions, ascii_string, draw};
//!
//! let mut tree = Tree::new();
//! let a = tree.add_leaf("A", Some(BranchLength::new(1.0)));
//! let b = tree.add_leaf("B", Some(BranchLength::new(2.0)));
//! tree.add_root(&[a, b]);
//!
//! let text = ascii_string(&tree, 40).unwrap();
//! assert_eq!(text.lines().count(), 4);
//!
//! let canvas = draw(&mut tree, &DrawOptions::new().with_do_show(false)).unwrap();
//! canvas.save(std::env::temp_dir().join("ab.svg")).unwrap();
//! ```

pub mod ascii;
pub mod config;
pub mod error;
#[cfg(feature = "graph")]
pub mod graph;
pub mod layout;
pub mod model;
pub mod plot;

pub use crate::error::{DrawError, Result};
pub use crate::plot::DrawOptions;

use crate::model::Tree;
use crate::plot::SvgCanvas;
use std::io::Write;

// ============================================================================
// Quick ASCII API
// ============================================================================
/// Draws an ASCII-art phylogram of `tree` into `out`.
///
/// See [`ascii::draw_ascii`] for full documentation.
pub fn draw_ascii<W: Write>(tree: &Tree, out: &mut W, column_width: usize) -> Result<()> {
    ascii::draw_ascii(tree, out, column_width)
}

/// Returns the ASCII-art phylogram of `tree` as a string.
///
/// See [`ascii::draw_ascii`] for full documentation.
pub fn ascii_string(tree: &Tree, column_width: usize) -> Result<String> {
    ascii::ascii_string(tree, column_width)
}

// ============================================================================
// Quick vector API
// ============================================================================
/// Draws `tree` onto a new SVG canvas.
///
/// See [`plot::draw`] for full documentation.
pub fn draw(tree: &mut Tree, options: &DrawOptions) -> Result<SvgCanvas> {
    plot::draw(tree, options)
}

/// Converts `tree` into a petgraph graph with weighted, colored edges.
///
/// See [`graph::to_graph`] for full documentation.
#[cfg(feature = "graph")]
pub fn to_graph(tree: &mut Tree) -> graph::CladeGraph {
    graph::to_graph(tree)
}
