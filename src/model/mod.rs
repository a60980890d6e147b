//! Data model for phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Clade] nodes referenced by [CladeIndex]. A clade with no children is a
//! terminal (tip); children are ordered and their number is not restricted.
//!
//! Drawing reads, but for color/width cascading also writes, the optional
//! clade annotations:
//!
//! | Annotation | Type | Used by |
//! |------------|------|---------|
//! | name | [String] | tip labels (all renderers) |
//! | branch length | [BranchLength] | depth layout, graph edge weights |
//! | confidence(s) | [f64] | branch labels of the vector renderer |
//! | color | [BranchColor] | vector renderer, graph edges |
//! | width | [f64] | vector renderer, graph edges |

pub mod clade;
pub mod color;
pub mod tree;

pub use clade::BranchLength;
pub use clade::Clade;
pub use color::BranchColor;
pub use tree::CladeIndex;
pub use tree::Tree;
