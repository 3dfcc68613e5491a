use std::collections::VecDeque;

use smallvec::{smallvec, SmallVec};

use super::*;
use crate::errors::{GraphInvariantError, InvariantCheck};

/// Original vertex ids represented by one current vertex. Near the leaves of
/// the search tree most groups hold a handful of entries, hence the inline
/// capacity.
pub type MergeGroup = SmallVec<[Node; 4]>;

/// Immutable graph snapshot for Zykov branching.
///
/// A snapshot tracks the current vertices after a sequence of merges together
/// with `mapping`, the partition of the original vertex set into merge
/// groups. Branching never mutates a snapshot; [`ZykovGraph::merge_vertices`]
/// and [`ZykovGraph::add_edge`] return fresh ones, so concurrent tasks can
/// hold onto their subproblem without synchronization.
#[derive(Debug, Clone)]
pub struct ZykovGraph {
    orig_n: NumNodes,
    adj: Vec<BitSet>,
    mapping: Vec<MergeGroup>,
}

impl GraphNodeOrder for ZykovGraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }
}

impl AdjacencyTest for ZykovGraph {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adj[u as usize].get_bit(v)
    }
}

impl ZykovGraph {
    /// Creates an edgeless snapshot of `n` unmerged vertices
    pub fn new(n: NumNodes) -> Self {
        Self {
            orig_n: n,
            adj: vec![BitSet::new(n); n as usize],
            mapping: (0..n).map(|u| smallvec![u]).collect(),
        }
    }

    /// Builds the root snapshot of an input graph; mapping is the identity
    pub fn from_graph<G: AdjacencyList>(graph: &G) -> Self {
        let mut result = Self::new(graph.number_of_nodes());

        for u in graph.vertices() {
            for &v in graph.neighbors_of(u) {
                result.adj[u as usize].set_bit(v);
            }
        }

        debug_assert!(result.is_correct().is_ok());
        result
    }

    /// Vertex count of the original input graph; constant across all
    /// snapshots derived from the same root
    pub fn original_nodes(&self) -> NumNodes {
        self.orig_n
    }

    pub fn degree_of(&self, u: Node) -> NumNodes {
        self.adj[u as usize].cardinality()
    }

    pub fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.adj[u as usize].iter_set_bits()
    }

    pub fn neighbors_bitset(&self, u: Node) -> &BitSet {
        &self.adj[u as usize]
    }

    /// Original vertex ids merged into current vertex `u`
    pub fn merge_group_of(&self, u: Node) -> &[Node] {
        &self.mapping[u as usize]
    }

    /// Zykov branch "same color": collapses `j` into `i`.
    ///
    /// Vertex `j` disappears, its neighborhood is unioned into `i`'s and its
    /// merge group is appended to `i`'s. Vertices above `j` shift down by
    /// one; everything else keeps its index.
    ///
    /// # Panics
    /// If `i == j`, an index is out of range, or the pair is adjacent.
    pub fn merge_vertices(&self, i: Node, j: Node) -> Self {
        let n = self.number_of_nodes();
        assert_ne!(i, j);
        assert!(i < n && j < n);
        assert!(!self.has_edge(i, j), "merging adjacent vertices is illegal");

        // old index -> index after j is removed
        let new_of = |w: Node| w - (w > j) as Node;

        let mut adj = Vec::with_capacity(n as usize - 1);
        let mut mapping = Vec::with_capacity(n as usize - 1);

        for k in self.vertices().filter(|&k| k != j) {
            let mut row = BitSet::new(n - 1);

            if k == i {
                // neither row contains i or j: the graph is loop-free and
                // the pair is non-adjacent
                for w in self.neighbors_of(i).chain(self.neighbors_of(j)) {
                    row.set_bit(new_of(w));
                }

                let mut group = self.mapping[i as usize].clone();
                group.extend_from_slice(&self.mapping[j as usize]);
                mapping.push(group);
            } else {
                for w in self.neighbors_of(k) {
                    row.set_bit(new_of(if w == j { i } else { w }));
                }

                mapping.push(self.mapping[k as usize].clone());
            }

            adj.push(row);
        }

        let result = Self {
            orig_n: self.orig_n,
            adj,
            mapping,
        };
        debug_assert!(result.is_correct().is_ok());
        result
    }

    /// Zykov branch "different colors": fresh snapshot with the edge {i, j}.
    /// Returns an identical copy if the edge already exists.
    ///
    /// # Panics
    /// If `i == j` or an index is out of range.
    pub fn add_edge(&self, i: Node, j: Node) -> Self {
        assert_ne!(i, j);
        assert!(i < self.number_of_nodes() && j < self.number_of_nodes());

        let mut result = self.clone();
        result.adj[i as usize].set_bit(j);
        result.adj[j as usize].set_bit(i);
        result
    }

    /// Induced subgraph on `vertices` in list order. Merge groups are
    /// inherited row-wise and `orig_n` is unchanged, so a coloring of the
    /// subgraph writes into the original coloring vector at the right
    /// positions.
    pub fn extract_subgraph(&self, vertices: &[Node]) -> Self {
        let k = vertices.len() as NumNodes;

        let mut adj = vec![BitSet::new(k); k as usize];
        for (a, &old_a) in vertices.iter().enumerate() {
            for (b, &old_b) in vertices.iter().enumerate().skip(a + 1) {
                if self.has_edge(old_a, old_b) {
                    adj[a].set_bit(b as Node);
                    adj[b].set_bit(a as Node);
                }
            }
        }

        Self {
            orig_n: self.orig_n,
            adj,
            mapping: vertices
                .iter()
                .map(|&v| self.mapping[v as usize].clone())
                .collect(),
        }
    }

    /// Connected components via BFS; vertices within a component appear in
    /// discovery order, components are ordered by their smallest start
    /// vertex.
    pub fn connected_components(&self) -> Vec<Vec<Node>> {
        let mut visited = BitSet::new(self.number_of_nodes());
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for start in self.vertices() {
            if !visited.set_bit(start) {
                continue;
            }

            let mut component = vec![start];
            queue.push_back(start);

            while let Some(v) = queue.pop_front() {
                for w in self.neighbors_of(v) {
                    if visited.set_bit(w) {
                        component.push(w);
                        queue.push_back(w);
                    }
                }
            }

            components.push(component);
        }

        components
    }
}

impl InvariantCheck<GraphInvariantError> for ZykovGraph {
    fn is_correct(&self) -> Result<(), GraphInvariantError> {
        for u in self.vertices() {
            if self.has_edge(u, u) {
                return Err(GraphInvariantError::SelfLoop(u));
            }

            if let Some(v) = self.neighbors_of(u).find(|&v| !self.has_edge(v, u)) {
                return Err(GraphInvariantError::Asymmetric(u, v));
            }

            if self.mapping[u as usize].is_empty() {
                return Err(GraphInvariantError::EmptyMapping(u));
            }
        }

        let mut seen = vec![0usize; self.orig_n as usize];
        for group in &self.mapping {
            for &orig in group {
                seen[orig as usize] += 1;
            }
        }

        if let Some(orig) = (0..self.orig_n).find(|&v| seen[v as usize] != 1) {
            return Err(GraphInvariantError::BrokenPartition(
                orig,
                seen[orig as usize],
            ));
        }

        Ok(())
    }
}
