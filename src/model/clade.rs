//! Clade module for phylogenetic tree representation.

use crate::model::color::BranchColor;
use crate::model::tree::CladeIndex;
use std::ops::Deref;

/// During construction, a clade might not have its parent set yet.
const NO_PARENT_SET: CladeIndex = usize::MAX;

// =#========================================================================#=
// CLADE
// =#========================================================================#=
/// Represents a clade (node) in a phylogenetic tree.
///
/// A clade is a terminal (tip) if it has no children, and an internal
/// branching point otherwise. Children are ordered; drawing relies on the
/// first and last child to place a parent.
///
/// All annotations are optional. Absence of a value is a plain `None`:
/// - `name` - label, shown for tips (and optionally for internal clades)
/// - `branch_length` - distance to the parent, non-negative if present
/// - `confidence` / `confidences` - support value(s) of the branching point
/// - `color` / `width` - graphics annotations of the branch leading to this clade
///
/// # Invariants
/// - `index` is the position of this clade in the tree arena
/// - `parent` is `NO_PARENT_SET = usize::MAX` only during construction and for the root
#[derive(PartialEq, Debug, Clone)]
pub struct Clade {
    /// Index of this clade in the tree arena
    index: CladeIndex,
    /// Index of the parent clade
    parent: CladeIndex,
    /// Indices of the child clades, in drawing order
    children: Vec<CladeIndex>,
    /// Label of this clade
    name: Option<String>,
    /// Distance to parent clade (optional, non-negative if present)
    branch_length: Option<BranchLength>,
    /// Single support value (e.g. bootstrap percentage)
    confidence: Option<f64>,
    /// Multiple support values, shown joined by `/`
    confidences: Option<Vec<f64>>,
    /// Branch color
    color: Option<BranchColor>,
    /// Branch width, as multiple of the base line width
    width: Option<f64>,
}

impl Clade {
    /// Creates a new terminal clade.
    ///
    /// # Arguments
    /// * `index` - The unique index of this clade in the tree (arena)
    /// * `name` - Label of the tip
    /// * `branch_length` - Distance to parent clade
    pub fn new_terminal(
        index: CladeIndex,
        name: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Self::new_internal(index, Vec::new(), branch_length).with_name(name)
    }

    /// Creates a new clade with the given children.
    ///
    /// # Arguments
    /// * `index` - The unique index of this clade in the tree (arena)
    /// * `children` - Ordered child indices
    /// * `branch_length` - Distance to parent clade
    pub fn new_internal(
        index: CladeIndex,
        children: Vec<CladeIndex>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Clade {
            index,
            parent: NO_PARENT_SET,
            children,
            name: None,
            branch_length,
            confidence: None,
            confidences: None,
            color: None,
            width: None,
        }
    }

    fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Returns the index of this clade.
    pub fn index(&self) -> CladeIndex {
        self.index
    }

    /// Returns `true` if this clade has no children.
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the ordered children of this clade (empty for tips).
    pub fn children(&self) -> &[CladeIndex] {
        &self.children
    }

    /// Returns the first child, or `None` for a tip.
    pub fn first_child(&self) -> Option<CladeIndex> {
        self.children.first().copied()
    }

    /// Returns the last child, or `None` for a tip.
    pub fn last_child(&self) -> Option<CladeIndex> {
        self.children.last().copied()
    }

    /// Sets new parent.
    pub(crate) fn set_parent(&mut self, parent: CladeIndex) {
        self.parent = parent;
    }

    /// Returns the index of the parent, or `None` for the root
    /// (and for clades not yet attached during construction).
    pub fn parent(&self) -> Option<CladeIndex> {
        if self.parent == NO_PARENT_SET {
            None
        } else {
            Some(self.parent)
        }
    }

    /// Returns `true` if this clade has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent != NO_PARENT_SET
    }

    /// Returns the name of this clade, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the name of this clade.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Returns the branch length, if any.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Sets the branch length.
    pub fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    /// Returns the single confidence value, if any.
    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    /// Sets the single confidence value.
    pub fn set_confidence(&mut self, confidence: Option<f64>) {
        self.confidence = confidence;
    }

    /// Returns the list of confidence values, if this clade carries one.
    pub fn confidences(&self) -> Option<&[f64]> {
        self.confidences.as_deref()
    }

    /// Sets the list of confidence values.
    pub fn set_confidences(&mut self, confidences: Option<Vec<f64>>) {
        self.confidences = confidences;
    }

    /// Returns the branch color, if any.
    pub fn color(&self) -> Option<BranchColor> {
        self.color
    }

    /// Sets the branch color.
    pub fn set_color(&mut self, color: Option<BranchColor>) {
        self.color = color;
    }

    /// Returns the branch width, if any.
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Sets the branch width.
    ///
    /// # Panics
    /// Panics if `width` is not positive.
    pub fn set_width(&mut self, width: Option<f64>) {
        if let Some(w) = width {
            assert!(w > 0.0, "Branch width must be positive, got {}", w);
        }
        self.width = width;
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a clade and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Arguments
    /// * `length` - The branch length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(
            length >= 0.0,
            "Branch length must be non-negative, got {}",
            length
        );
        assert!(
            length.is_finite(),
            "Branch length must be finite, got {}",
            length
        );
        BranchLength(length)
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}
