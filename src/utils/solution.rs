use itertools::Itertools;

use crate::graph::*;

/// Color assigned to an original vertex. Signed so that "unset" sorts below
/// every real color, which the component-wise max reduction across workers
/// relies on.
pub type Color = i32;

pub const UNCOLORED: Color = -1;

/// A complete (or not yet found, `num_colors == INFINITY`) coloring of the
/// original input graph.
#[derive(Debug, Clone)]
pub struct ColoringSolution {
    num_colors: NumNodes,
    coloring: Vec<Color>,
}

impl ColoringSolution {
    /// Creates an empty solution with all `orig_n` vertices uncolored
    pub fn new(orig_n: NumNodes) -> Self {
        Self {
            num_colors: INFINITY,
            coloring: vec![UNCOLORED; orig_n as usize],
        }
    }

    pub fn num_colors(&self) -> NumNodes {
        self.num_colors
    }

    pub fn coloring(&self) -> &[Color] {
        &self.coloring
    }

    /// Replaces the stored solution by a coloring of `graph`'s current
    /// vertices, translated back to original vertex ids through the merge
    /// groups. Vertices outside the snapshot's mapping are reset to
    /// [`UNCOLORED`].
    pub fn record(&mut self, num_colors: NumNodes, graph: &ZykovGraph, current_colors: &[Color]) {
        debug_assert_eq!(current_colors.len(), graph.len());
        debug_assert_eq!(self.coloring.len(), graph.original_nodes() as usize);

        self.num_colors = num_colors;
        self.coloring.fill(UNCOLORED);

        for u in graph.vertices() {
            for &orig in graph.merge_group_of(u) {
                self.coloring[orig as usize] = current_colors[u as usize];
            }
        }
    }

    /// True if every vertex carries a color
    pub fn is_complete(&self) -> bool {
        self.coloring.iter().all(|&c| c != UNCOLORED)
    }

    /// True if no edge of `graph` is monochromatic; uncolored endpoints are
    /// never conflicting
    pub fn is_proper_for<G: AdjacencyList>(&self, graph: &G) -> bool {
        graph.vertices().all(|u| {
            let cu = self.coloring[u as usize];
            cu == UNCOLORED
                || graph
                    .neighbors_of(u)
                    .iter()
                    .all(|&v| self.coloring[v as usize] != cu)
        })
    }

    /// Number of distinct colors actually present
    pub fn colors_used(&self) -> NumNodes {
        self.coloring
            .iter()
            .filter(|&&c| c != UNCOLORED)
            .unique()
            .count() as NumNodes
    }
}
