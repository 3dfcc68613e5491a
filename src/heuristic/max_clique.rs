use crate::graph::*;

/// Maximum clique of a snapshot via Bron–Kerbosch with pivoting.
///
/// The clique number is the lower bound fed into the search; snapshots near
/// the leaves of the Zykov tree are small, so the enumeration runs to
/// completion without an internal budget.
///
/// Returns the clique size and a witness.
pub fn max_clique(graph: &ZykovGraph) -> (NumNodes, Vec<Node>) {
    let mut best = Vec::new();
    let mut stack = Vec::new();

    bron_kerbosch(
        graph,
        &mut stack,
        BitSet::new_all_set(graph.number_of_nodes()),
        BitSet::new(graph.number_of_nodes()),
        &mut best,
    );

    (best.len() as NumNodes, best)
}

fn bron_kerbosch(
    graph: &ZykovGraph,
    stack: &mut Vec<Node>,
    mut candidates: BitSet,
    mut excluded: BitSet,
    best: &mut Vec<Node>,
) {
    if candidates.is_empty() && excluded.is_empty() {
        if stack.len() > best.len() {
            best.clone_from(stack);
        }
        return;
    }

    // pivot from P ∪ X maximizing |P ∩ N(u)|; scanning vertices in order
    // keeps the smallest index among ties
    let mut pivot = None;
    let mut pivot_score = 0;
    for u in graph.vertices() {
        if !candidates.get_bit(u) && !excluded.get_bit(u) {
            continue;
        }

        let score = candidates.and_cardinality(graph.neighbors_bitset(u));
        if pivot.is_none() || score > pivot_score {
            pivot = Some(u);
            pivot_score = score;
        }
    }

    let outside_pivot = candidates.difference(graph.neighbors_bitset(pivot.unwrap()));

    for v in outside_pivot.iter_set_bits() {
        let neighbors = graph.neighbors_bitset(v);

        stack.push(v);
        bron_kerbosch(
            graph,
            stack,
            candidates.intersection(neighbors),
            excluded.intersection(neighbors),
            best,
        );
        stack.pop();

        candidates.clear_bit(v);
        excluded.set_bit(v);

        if candidates.is_empty() {
            break;
        }
    }
}
