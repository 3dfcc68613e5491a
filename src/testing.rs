//! Graph builders and a brute-force reference solver shared by the tests.

use crate::graph::*;
use crate::utils::{Color, UNCOLORED};

pub fn zykov_of(graph: &AdjArray) -> ZykovGraph {
    ZykovGraph::from_graph(graph)
}

pub fn triangle() -> AdjArray {
    complete(3)
}

pub fn complete(n: NumNodes) -> AdjArray {
    let mut graph = AdjArray::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            graph.add_edge(u, v);
        }
    }
    graph
}

pub fn cycle(n: NumNodes) -> AdjArray {
    assert!(n >= 3);
    let mut graph = AdjArray::new(n);
    graph.add_edges((0..n).map(|u| (u, (u + 1) % n)));
    graph
}

/// The standard Petersen graph: outer 5-cycle, inner pentagram, five spokes
pub fn petersen() -> AdjArray {
    let mut graph = AdjArray::new(10);
    graph.add_edges((0..5).map(|i| (i, (i + 1) % 5)));
    graph.add_edges((0..5).map(|i| (i, i + 5)));
    graph.add_edges((0..5).map(|i| (5 + i, 5 + (i + 2) % 5)));
    graph
}

/// The Grötzsch graph (Mycielskian of C5): triangle-free with chromatic
/// number 4, so the clique bound stays strictly below the coloring bound
pub fn groetzsch() -> AdjArray {
    let mut graph = AdjArray::new(11);
    // outer cycle 0..5, shadow vertices 5..10, apex 10
    graph.add_edges((0..5).map(|i| (i, (i + 1) % 5)));
    graph.add_edges((0..5).flat_map(|i| [(5 + i, (i + 1) % 5), (5 + i, (i + 4) % 5)]));
    graph.add_edges((5..10).map(|v| (v, 10)));
    graph
}

pub fn two_disjoint_triangles() -> AdjArray {
    let mut graph = AdjArray::new(6);
    graph.add_edges([(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
    graph
}

/// The current vertices of a snapshot as a plain graph, forgetting the
/// merge groups; lets the brute-force solver run on intermediate search
/// states
pub fn current_graph_of(snapshot: &ZykovGraph) -> AdjArray {
    let mut graph = AdjArray::new(snapshot.number_of_nodes());
    for u in snapshot.vertices() {
        for v in snapshot.neighbors_of(u) {
            if u < v {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}

/// Relabels vertices; `permutation[old] = new`
pub fn relabelled(graph: &AdjArray, permutation: &[Node]) -> AdjArray {
    let mut result = AdjArray::new(graph.number_of_nodes());
    result.add_edges(
        graph
            .ordered_edges()
            .map(|Edge(u, v)| (permutation[u as usize], permutation[v as usize])),
    );
    result
}

/// Exact chromatic number by k-coloring backtracking; only for tiny graphs
pub fn brute_force_chromatic_number(graph: &AdjArray) -> NumNodes {
    let n = graph.number_of_nodes();
    if n == 0 {
        return 0;
    }

    (1..=n)
        .find(|&k| {
            let mut colors = vec![UNCOLORED; n as usize];
            is_k_colorable(graph, k, 0, &mut colors)
        })
        .unwrap()
}

fn is_k_colorable(graph: &AdjArray, k: NumNodes, vertex: usize, colors: &mut [Color]) -> bool {
    if vertex == graph.len() {
        return true;
    }

    // symmetry breaking: allow at most one color beyond the ones in use
    let highest_used = colors[..vertex].iter().copied().max().unwrap_or(UNCOLORED);
    let limit = (highest_used + 1).min(k as Color - 1);

    for color in 0..=limit {
        if graph
            .neighbors_of(vertex as Node)
            .iter()
            .all(|&w| colors[w as usize] != color)
        {
            colors[vertex] = color;
            if is_k_colorable(graph, k, vertex + 1, colors) {
                return true;
            }
            colors[vertex] = UNCOLORED;
        }
    }

    false
}
