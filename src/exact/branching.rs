use itertools::Itertools;

use crate::graph::*;

/// Selects the non-adjacent pair with maximum degree sum for Zykov
/// branching; ties fall to the lexicographically smallest pair. Returns
/// `None` exactly if the snapshot is a clique.
pub fn select_branching_pair(graph: &ZykovGraph) -> Option<(Node, Node)> {
    let degrees = graph.vertices().map(|u| graph.degree_of(u)).collect_vec();

    let mut best = None;
    let mut best_score = 0;

    for v1 in graph.vertices() {
        for v2 in (v1 + 1)..graph.number_of_nodes() {
            if graph.has_edge(v1, v2) {
                continue;
            }

            let score = degrees[v1 as usize] + degrees[v2 as usize];
            if best.is_none() || score > best_score {
                best = Some((v1, v2));
                best_score = score;
            }
        }
    }

    best
}
