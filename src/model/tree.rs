//! Provides the tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [Tree] - Main tree structure using the arena pattern
//! * [CladeIndex] as type used to index clades in tree
//!
//! Besides construction and traversal, a tree answers the queries drawing
//! is built on: [Tree::depths], [Tree::terminals] and [Tree::count_terminals].

use crate::model::clade::{BranchLength, Clade};

/// Index of a clade in a tree (arena).
pub type CladeIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: CladeIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A phylogenetic tree represented using the arena pattern on [Clade].
///
/// Clades are stored in a contiguous vector and referenced by [CladeIndex].
/// Aim is to avoid referencing troubles as well as to provide efficient
/// memory layout; per-clade drawing data (depths, positions) is likewise
/// kept in vectors parallel to the arena.
///
/// # Structure
/// - All clades (root, internal, and tips) are stored in the arena.
/// - Index of root is maintained.
/// - Clades may have any number of ordered children (not only two).
/// - No assumption on order of indices is maintained.
/// - Branch lengths are optional, but if provided must be non-negative.
///
/// # Construction
/// Add tips first, then their parents, then the root (bottom-up).
/// A tree consisting of a single clade is built with [Tree::single].
/// Test validity with [`Tree::is_valid()`].
///
/// # Example
/// ```
/// use phylodraw::model::{BranchLength, Tree};
///
/// // Create a tree: ((A:0.2,B:0.2):0.2,C:0.4);
/// let mut tree = Tree::new();
/// let a = tree.add_leaf("A", Some(BranchLength::new(0.2)));
/// let b = tree.add_leaf("B", Some(BranchLength::new(0.2)));
/// let c = tree.add_leaf("C", Some(BranchLength::new(0.4)));
/// let ab = tree.add_clade(&[a, b], Some(BranchLength::new(0.2)));
/// tree.add_root(&[ab, c]);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.count_terminals(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Clades of this tree (arena pattern)
    clades: Vec<Clade>,

    /// Index of the root of this tree
    root_index: CladeIndex,

    /// Whether the tree is rooted; decides the kind of exported graph
    rooted: bool,

    /// Name of tree; optional, shown as plot title
    name: Option<String>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty and rooted tree.
    pub fn new() -> Self {
        Tree {
            clades: Vec::new(),
            root_index: NO_ROOT_SET_INDEX,
            rooted: true,
            name: None,
        }
    }

    /// Creates a new tree with capacity for a binary tree with `num_leaves` leaves.
    ///
    /// # Arguments
    /// `num_leaves` - expected number of leaves; must be positive
    pub fn with_capacity(num_leaves: usize) -> Self {
        assert!(num_leaves > 0);
        Tree {
            clades: Vec::with_capacity(2 * num_leaves - 1),
            ..Tree::new()
        }
    }

    /// Creates a tree consisting of a single (root) clade.
    pub fn single(name: &str) -> Self {
        let mut tree = Tree::new();
        let index = tree.add_leaf(name, None);
        tree.root_index = index;
        tree
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether this tree is rooted.
    pub fn with_rooted(mut self, rooted: bool) -> Self {
        self.rooted = rooted;
        self
    }

    /// Adds a named tip to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `name` - Label of the tip
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    pub fn add_leaf(&mut self, name: &str, branch_length: Option<BranchLength>) -> CladeIndex {
        let index = self.clades.len();
        self.clades.push(Clade::new_terminal(
            index,
            Some(name.to_string()),
            branch_length,
        ));
        index
    }

    /// Adds an unnamed tip to the tree, assigning a unique index, which gets returned.
    pub fn add_unnamed_leaf(&mut self, branch_length: Option<BranchLength>) -> CladeIndex {
        let index = self.clades.len();
        self.clades
            .push(Clade::new_terminal(index, None, branch_length));
        index
    }

    /// Adds an internal clade to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Ordered child indices (previously added)
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    ///
    /// # Panics
    /// Panics if `children` is empty or contains an index out of bounds.
    pub fn add_clade(
        &mut self,
        children: &[CladeIndex],
        branch_length: Option<BranchLength>,
    ) -> CladeIndex {
        assert!(!children.is_empty(), "Internal clade needs at least one child");
        let index = self.clades.len();
        self.clades
            .push(Clade::new_internal(index, children.to_vec(), branch_length));

        for &child in children {
            self[child].set_parent(index);
        }

        index
    }

    /// Adds the root to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Ordered child indices
    ///
    /// # Panics
    /// Panics if `children` is empty or contains an index out of bounds.
    pub fn add_root(&mut self, children: &[CladeIndex]) -> CladeIndex {
        let index = self.add_clade(children, None);
        self.root_index = index;
        index
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Returns whether this tree is rooted.
    pub fn rooted(&self) -> bool {
        self.rooted
    }

    /// Sets whether this tree is rooted.
    pub fn set_rooted(&mut self, rooted: bool) {
        self.rooted = rooted;
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root clade.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Clade {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> CladeIndex {
        self.root_index
    }

    /// Returns a reference to the clade at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn clade(&self, index: CladeIndex) -> &Clade {
        &self[index]
    }

    /// Returns a mutable reference to the clade at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn clade_mut(&mut self, index: CladeIndex) -> &mut Clade {
        &mut self.clades[index]
    }

    /// Returns the number of clades in this tree.
    pub fn num_clades(&self) -> usize {
        self.clades.len()
    }

    /// Returns the number of terminal clades (tips) in this tree.
    pub fn count_terminals(&self) -> usize {
        self.pre_order_iter().filter(|c| c.is_terminal()).count()
    }

    /// Returns the terminal clades in left-to-right (pre-order) order.
    pub fn terminals(&self) -> Vec<CladeIndex> {
        self.pre_order_iter()
            .filter(|c| c.is_terminal())
            .map(|c| c.index())
            .collect()
    }

    /// Returns the cumulative depth of every clade, parallel to the arena.
    ///
    /// The root has depth 0. Each other clade adds its branch length
    /// (absent lengths count as 0) to its parent's depth, or exactly 1 if
    /// `unit_branch_lengths` is set, making depth the number of edges
    /// from the root.
    ///
    /// Clades not reachable from the root keep depth 0.
    pub fn depths(&self, unit_branch_lengths: bool) -> Vec<f64> {
        let mut depths = vec![0.0; self.num_clades()];

        for clade in self.pre_order_iter() {
            let here = depths[clade.index()];
            for &child in clade.children() {
                let step = if unit_branch_lengths {
                    1.0
                } else {
                    self[child].branch_length().map_or(0.0, |bl| *bl)
                };
                depths[child] = here + step;
            }
        }

        depths
    }

    /// Passes the color and width of a clade on to those of its children
    /// that have none of their own.
    ///
    /// Inheritance is one step only; applied top-down (in pre-order) a color
    /// set on one clade reaches its whole subtree, up to clades with their
    /// own color. This writes into the tree and is not undone.
    ///
    /// # Example
    /// ```
    /// use phylodraw::model::{BranchColor, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let a = tree.add_leaf("A", None);
    /// let b = tree.add_leaf("B", None);
    /// let root = tree.add_root(&[a, b]);
    /// tree[root].set_color(Some(BranchColor::from_rgb(255, 0, 0)));
    /// tree[b].set_color(Some(BranchColor::from_rgb(0, 0, 255)));
    ///
    /// tree.cascade_graphics(root);
    /// assert_eq!(tree[a].color(), Some(BranchColor::from_rgb(255, 0, 0)));
    /// assert_eq!(tree[b].color(), Some(BranchColor::from_rgb(0, 0, 255)));
    /// ```
    pub fn cascade_graphics(&mut self, index: CladeIndex) {
        let color = self[index].color();
        let width = self[index].width();
        if color.is_none() && width.is_none() {
            return;
        }

        for i in 0..self[index].children().len() {
            let child = self[index].children()[i];
            let clade = &mut self[child];
            if clade.color().is_none() && color.is_some() {
                clade.set_color(color);
            }
            if clade.width().is_none() && width.is_some() {
                clade.set_width(width);
            }
        }
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and the root has no parent
    /// - All clade indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - All non-root clades have a parent that lists them as a child
    /// - Every clade is reachable from the root
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        // Check root index is set and within bounds
        if self.root_index == NO_ROOT_SET_INDEX || self.root_index >= self.clades.len() {
            return false;
        }

        // Root should not have a parent set
        if self.root().has_parent() {
            return false;
        }

        for (index, clade) in self.clades.iter().enumerate() {
            // Check clade index matches its arena position
            if clade.index() != index {
                return false;
            }

            // Check children references
            for &child in clade.children() {
                if child >= self.clades.len() || self.clades[child].parent() != Some(index) {
                    return false;
                }
            }

            // Non-root must have valid parent that includes this clade
            if index != self.root_index {
                match clade.parent() {
                    None => return false,
                    Some(parent_index) => {
                        if parent_index >= self.clades.len()
                            || !self.clades[parent_index].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        // Check that the traversal reaches every clade exactly once
        self.pre_order_iter().count() == self.clades.len()
    }
}

impl std::ops::Index<CladeIndex> for Tree {
    type Output = Clade;

    fn index(&self, index: CladeIndex) -> &Self::Output {
        &self.clades[index]
    }
}

impl std::ops::IndexMut<CladeIndex> for Tree {
    fn index_mut(&mut self, index: CladeIndex) -> &mut Self::Output {
        &mut self.clades[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each clade's children before visiting the clade itself.
    /// This is useful for computing positions bottom-up, aggregating data from leaves upward, etc.
    ///
    /// # Example
    /// ```
    /// use phylodraw::model::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let a = tree.add_leaf("A", None);
    /// let b = tree.add_leaf("B", None);
    /// let root = tree.add_root(&[a, b]);
    ///
    /// let indices: Vec<_> = tree.post_order_iter().map(|c| c.index()).collect();
    /// assert_eq!(indices, vec![a, b, root]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Pre-order traversal visits each clade before visiting its children.
    /// This is useful for propagating data from root to leaves.
    ///
    /// # Example
    /// ```
    /// use phylodraw::model::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let a = tree.add_leaf("A", None);
    /// let b = tree.add_leaf("B", None);
    /// let root = tree.add_root(&[a, b]);
    ///
    /// let indices: Vec<_> = tree.pre_order_iter().map(|c| c.index()).collect();
    /// assert_eq!(indices, vec![root, a, b]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each clade is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(CladeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Clade;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let clade = &self.tree[index];

            if children_visited || clade.is_terminal() {
                // Either we've already processed children, or this is a tip
                return Some(clade);
            } else {
                // Mark this clade as "children will be visited"
                self.stack.push((index, true));

                // Push children in reverse, so the first child is processed first
                for &child in clade.children().iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each clade is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<CladeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Clade;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let clade = &self.tree[index];

        // Push children onto stack in reverse, so the first child is processed first
        self.stack.extend(clade.children().iter().rev());

        Some(clade)
    }
}
