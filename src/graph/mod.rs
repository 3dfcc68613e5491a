pub mod adj_array;
pub mod bitset;
pub mod edge;
pub mod gnp;
pub mod zykov;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;

/// Number-of-colors sentinel for "no coloring known yet". Kept well below
/// `Node::MAX` so it survives signed reductions and prints as a recognizable
/// literal in reports.
pub const INFINITY: NumNodes = 1_000_000_000;

use std::ops::Range;

pub use adj_array::*;
pub use bitset::*;
pub use edge::*;
pub use gnp::*;
pub use zykov::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns a slice of neighbors of a given vertex.
    /// ** Panics if v >= n **
    fn neighbors_of(&self, u: Node) -> &[Node];

    /// Returns the number of neighbors of [`u`]
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).len() as NumNodes
    }

    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns the largest degree, or 0 for an empty graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }
}

/// Provides efficient tests whether an edge exists
pub trait AdjacencyTest {
    /// Returns *true* exactly if the graph contains the undirected edge {u, v}
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert edges
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the undirected edge {u,v} to the graph.
    /// ** Panics if the edge is already contained or if u == v or u, v >= n **
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(self.try_add_edge(u, v))
    }

    /// Adds the undirected edge {u,v} to the graph.
    /// Returns *true* exactly if the edge was not present previously.
    /// ** Panics if u == v or u, v >= n **
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool;

    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v);
        }
    }
}
