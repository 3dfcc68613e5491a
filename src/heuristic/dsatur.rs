use crate::graph::*;
use crate::utils::{Color, UNCOLORED};

/// Greedy DSATUR coloring of a snapshot's current vertices.
///
/// In every round the uncolored vertex with the highest saturation (number
/// of distinct colors in its neighborhood) receives the smallest color not
/// used by a neighbor. Ties are broken by larger current degree, then by
/// smaller vertex index; this policy is part of the contract and the search
/// relies on it being deterministic.
///
/// Returns `(1 + max color, coloring)`; the coloring is proper on the
/// snapshot and uses colors `0..num_colors` contiguously.
pub fn dsatur_coloring(graph: &ZykovGraph) -> (NumNodes, Vec<Color>) {
    let n = graph.number_of_nodes();
    let mut colors = vec![UNCOLORED; n as usize];
    // per vertex: set of colors already taken by its neighbors
    let mut taken = vec![BitSet::new(n); n as usize];
    let mut num_colors = 0;

    for _ in 0..n {
        let mut best: Option<(Node, NumNodes, NumNodes)> = None;

        for v in graph.vertices() {
            if colors[v as usize] != UNCOLORED {
                continue;
            }

            let key = (taken[v as usize].cardinality(), graph.degree_of(v));
            if best.is_none_or(|(_, sat, deg)| key > (sat, deg)) {
                best = Some((v, key.0, key.1));
            }
        }

        let (v, _, _) = best.unwrap();

        // at most deg(v) < n colors are taken, so a free one exists
        let color = taken[v as usize].first_unset_bit().unwrap();
        colors[v as usize] = color as Color;
        num_colors = num_colors.max(color + 1);

        for w in graph.neighbors_of(v) {
            if colors[w as usize] == UNCOLORED {
                taken[w as usize].set_bit(color);
            }
        }
    }

    (num_colors, colors)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::{AdjArray, GraphEdgeEditing, GraphNew};
    use crate::testing::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn is_proper(graph: &ZykovGraph, colors: &[Color]) -> bool {
        graph
            .vertices()
            .all(|u| graph.neighbors_of(u).all(|v| colors[u as usize] != colors[v as usize]))
    }

    #[test]
    fn empty_and_singleton() {
        assert_eq!(dsatur_coloring(&ZykovGraph::new(0)), (0, vec![]));
        assert_eq!(dsatur_coloring(&ZykovGraph::new(1)), (1, vec![0]));
    }

    #[test]
    fn edgeless_graph_uses_one_color() {
        let (num, colors) = dsatur_coloring(&ZykovGraph::new(5));
        assert_eq!(num, 1);
        assert_eq!(colors, [0; 5]);
    }

    #[test]
    fn triangle_needs_three() {
        let (num, colors) = dsatur_coloring(&zykov_of(&triangle()));
        assert_eq!(num, 3);
        assert_eq!(colors.iter().copied().sorted().collect_vec(), [0, 1, 2]);
    }

    #[test]
    fn cycles() {
        assert_eq!(dsatur_coloring(&zykov_of(&cycle(4))).0, 2);
        assert_eq!(dsatur_coloring(&zykov_of(&cycle(5))).0, 3);
        assert_eq!(dsatur_coloring(&zykov_of(&cycle(6))).0, 2);
    }

    #[test]
    fn tie_break_contract_on_path() {
        // all saturations start at 0, so the middle vertex wins by degree;
        // afterwards both leaves tie and the smaller index is colored first
        let mut graph = AdjArray::new(3);
        graph.add_edges([(0, 1), (1, 2)]);

        let (num, colors) = dsatur_coloring(&zykov_of(&graph));
        assert_eq!(num, 2);
        assert_eq!(colors, [1, 0, 1]);
    }

    #[test]
    fn saturation_beats_degree() {
        // triangle 0-1-2 with a pendant 3 at vertex 0: once 0 and 1 are
        // colored, vertex 2 (saturation 2) is preferred over 3 even though
        // both have one uncolored round left
        let mut graph = AdjArray::new(4);
        graph.add_edges([(0, 1), (1, 2), (0, 2), (0, 3)]);

        let (num, colors) = dsatur_coloring(&zykov_of(&graph));
        assert_eq!(num, 3);
        assert_eq!(colors, [0, 1, 2, 1]);
    }

    #[test]
    fn colors_are_contiguous_and_proper_on_random_graphs() {
        let mut rng = Pcg64::seed_from_u64(0xd5a7);

        for _ in 0..50 {
            let graph = AdjArray::random_gnp(&mut rng, 16, 0.4);
            let snapshot = zykov_of(&graph);
            let (num, colors) = dsatur_coloring(&snapshot);

            assert!(is_proper(&snapshot, &colors));
            assert_eq!(
                colors.iter().copied().unique().sorted().collect_vec(),
                (0..num as Color).collect_vec()
            );
            // greedy never beats the max-degree-plus-one bound
            assert!(num <= graph.max_degree() + 1);
        }
    }
}
