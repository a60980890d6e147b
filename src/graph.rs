//! Export of trees into [petgraph] graphs.
//!
//! Every clade becomes one node, every parent-child relation one edge from
//! parent to child. Rooted trees give a directed graph, unrooted trees an
//! undirected one. Edges carry an [EdgeAttrs] whose content depends on the
//! chosen [EdgeCapability].

use crate::model::{BranchColor, Clade, CladeIndex, Tree};
use petgraph::graph::{DiGraph, Graph, NodeIndex, UnGraph};
use petgraph::EdgeType;
use std::cmp::Ordering;
use tracing::debug;

/// Edge weight used for clades without branch length or with a zero one.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Version of the edge attribute format [to_graph] produces, resolved
/// through [EdgeCapability::detect].
pub const EDGE_FORMAT_VERSION: &str = "1.0";

/// Node weight: the clade a node stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct CladeNode {
    /// Index of the clade in the tree, equal to the node index in the graph
    pub index: CladeIndex,
    pub name: Option<String>,
}

/// Edge weight: attributes of the branch leading to the child clade.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeAttrs {
    /// Branch length of the child, [DEFAULT_EDGE_WEIGHT] if absent or zero
    pub weight: Option<f64>,
    pub color: Option<BranchColor>,
    pub width: Option<f64>,
}

// =#========================================================================#=
// EDGE CAPABILITY
// =#========================================================================#=
/// What a graph consumer can store on edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeCapability {
    /// Weight, color and width; colors and widths cascade to children
    #[default]
    Attributed,
    /// Weight only
    WeightOnly,
    /// No attributes at all
    Bare,
}

impl EdgeCapability {
    /// Picks the capability from the version string of a graph consumer:
    /// `1.0` and later are [Attributed](Self::Attributed), `0.99` and later
    /// [WeightOnly](Self::WeightOnly), anything older [Bare](Self::Bare).
    ///
    /// # Example
    /// ```
    /// use phylodraw::graph::EdgeCapability;
    ///
    /// assert_eq!(EdgeCapability::detect("2.8.8"), EdgeCapability::Attributed);
    /// assert_eq!(EdgeCapability::detect("0.99"), EdgeCapability::WeightOnly);
    /// assert_eq!(EdgeCapability::detect("0.36"), EdgeCapability::Bare);
    /// ```
    pub fn detect(version: &str) -> Self {
        if compare_versions(version, "1.0") != Ordering::Less {
            EdgeCapability::Attributed
        } else if compare_versions(version, "0.99") != Ordering::Less {
            EdgeCapability::WeightOnly
        } else {
            EdgeCapability::Bare
        }
    }
}

/// Compares dot-separated versions numerically component by component,
/// ignoring non-digit suffixes such as `rc1`; missing components count as 0.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.trim()
            .split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    };
    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    for i in 0..len {
        let (x, y) = (
            a.get(i).copied().unwrap_or(0),
            b.get(i).copied().unwrap_or(0),
        );
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

// =#========================================================================#=
// CLADE GRAPH
// =#========================================================================#=
/// Graph of a tree; directed iff the tree is rooted.
#[derive(Debug, Clone)]
pub enum CladeGraph {
    Directed(DiGraph<CladeNode, EdgeAttrs>),
    Undirected(UnGraph<CladeNode, EdgeAttrs>),
}

impl CladeGraph {
    /// Returns `true` for the graph of a rooted tree.
    pub fn is_directed(&self) -> bool {
        matches!(self, CladeGraph::Directed(_))
    }

    /// Returns the number of nodes, one per clade.
    pub fn node_count(&self) -> usize {
        match self {
            CladeGraph::Directed(g) => g.node_count(),
            CladeGraph::Undirected(g) => g.node_count(),
        }
    }

    /// Returns the number of edges, one per clade with a parent.
    pub fn edge_count(&self) -> usize {
        match self {
            CladeGraph::Directed(g) => g.edge_count(),
            CladeGraph::Undirected(g) => g.edge_count(),
        }
    }

    /// Returns the node of a clade.
    pub fn node(&self, index: CladeIndex) -> Option<&CladeNode> {
        match self {
            CladeGraph::Directed(g) => g.node_weight(NodeIndex::new(index)),
            CladeGraph::Undirected(g) => g.node_weight(NodeIndex::new(index)),
        }
    }

    /// Returns the attributes of the edge between two clades, if any.
    pub fn edge(&self, parent: CladeIndex, child: CladeIndex) -> Option<&EdgeAttrs> {
        let (a, b) = (NodeIndex::new(parent), NodeIndex::new(child));
        match self {
            CladeGraph::Directed(g) => g.find_edge(a, b).and_then(|e| g.edge_weight(e)),
            CladeGraph::Undirected(g) => g.find_edge(a, b).and_then(|e| g.edge_weight(e)),
        }
    }

    /// Returns all edges as `(parent, child, attributes)` in insertion order.
    pub fn edges(&self) -> Vec<(CladeIndex, CladeIndex, EdgeAttrs)> {
        fn collect<Ty: EdgeType>(
            g: &Graph<CladeNode, EdgeAttrs, Ty>,
        ) -> Vec<(CladeIndex, CladeIndex, EdgeAttrs)> {
            g.raw_edges()
                .iter()
                .map(|e| (e.source().index(), e.target().index(), e.weight))
                .collect()
        }
        match self {
            CladeGraph::Directed(g) => collect(g),
            CladeGraph::Undirected(g) => collect(g),
        }
    }
}

/// Converts `tree` into a graph with the edges [EDGE_FORMAT_VERSION] supports.
///
/// See [to_graph_with]. Like drawing, this writes cascaded colors and
/// widths into `tree`.
///
/// # Example
/// ```
/// use phylodraw::graph::to_graph;
/// use phylodraw::model::{BranchLength, Tree};
///
/// let mut tree = Tree::new();
/// let a = tree.add_leaf("A", Some(BranchLength::new(0.5)));
/// let b = tree.add_leaf("B", None);
/// let root = tree.add_root(&[a, b]);
///
/// let graph = to_graph(&mut tree);
/// assert!(graph.is_directed());
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.edge(root, a).unwrap().weight, Some(0.5));
/// assert_eq!(graph.edge(root, b).unwrap().weight, Some(1.0));
/// ```
pub fn to_graph(tree: &mut Tree) -> CladeGraph {
    to_graph_with(tree, EdgeCapability::detect(EDGE_FORMAT_VERSION))
}

/// Converts `tree` into a graph whose edges carry what `capability` allows.
///
/// Node `i` of the graph is clade `i` of the tree. Edges are added in
/// pre-order of their parent. With [EdgeCapability::Attributed], the color
/// and width of a clade are passed on to children without their own
/// before the edges to them are added, so a color travels down the subtree.
pub fn to_graph_with(tree: &mut Tree, capability: EdgeCapability) -> CladeGraph {
    debug!(
        ?capability,
        directed = tree.rooted(),
        num_clades = tree.num_clades(),
        "exporting tree to graph"
    );
    if tree.rooted() {
        CladeGraph::Directed(build(tree, capability))
    } else {
        CladeGraph::Undirected(build(tree, capability))
    }
}

fn build<Ty: EdgeType>(tree: &mut Tree, capability: EdgeCapability) -> Graph<CladeNode, EdgeAttrs, Ty> {
    let n = tree.num_clades();
    let mut graph = Graph::with_capacity(n, n.saturating_sub(1));
    for i in 0..n {
        graph.add_node(CladeNode {
            index: i,
            name: tree[i].name().map(str::to_string),
        });
    }

    if !tree.is_root_set() {
        return graph;
    }

    let parents: Vec<CladeIndex> = tree
        .pre_order_iter()
        .filter(|c| !c.is_terminal())
        .map(|c| c.index())
        .collect();

    for parent in parents {
        if capability == EdgeCapability::Attributed {
            tree.cascade_graphics(parent);
        }
        for &child in tree[parent].children() {
            graph.add_edge(
                NodeIndex::new(parent),
                NodeIndex::new(child),
                edge_attrs(&tree[child], capability),
            );
        }
    }

    graph
}

fn edge_attrs(child: &Clade, capability: EdgeCapability) -> EdgeAttrs {
    let weight = child
        .branch_length()
        .map(|bl| *bl)
        .filter(|&w| w != 0.0)
        .unwrap_or(DEFAULT_EDGE_WEIGHT);
    match capability {
        EdgeCapability::Attributed => EdgeAttrs {
            weight: Some(weight),
            color: child.color(),
            width: child.width(),
        },
        EdgeCapability::WeightOnly => EdgeAttrs {
            weight: Some(weight),
            ..EdgeAttrs::default()
        },
        EdgeCapability::Bare => EdgeAttrs::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_versions_is_numeric() {
        assert_eq!(compare_versions("10.0", "9.1"), Ordering::Greater);
        assert_eq!(compare_versions("1.0", "1"), Ordering::Equal);
        assert_eq!(compare_versions("1.0rc1", "1.0"), Ordering::Equal);
        assert_eq!(compare_versions("0.98", "0.99"), Ordering::Less);
    }
}
