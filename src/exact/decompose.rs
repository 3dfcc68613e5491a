use ::log::debug;

use crate::graph::*;
use crate::heuristic::{dsatur_coloring, max_clique};

use super::{select_branching_pair, Deadline};

/// Static task decomposition: expands the Zykov tree to `depth_limit` and
/// collects the frontier snapshots as independent subproblems for the
/// coarse scheduler.
///
/// Internal nodes run the same pruning tests as the search itself. A node
/// with `lb == ub` is resolved within the decomposition and intentionally
/// *not* collected; a node with `lb >= reference_ub` cannot contribute. The
/// merge child is expanded before the add-edge child, so the task list is a
/// pure function of the root snapshot and every worker derives the identical
/// list. The caller must fall back to the root snapshot when the returned
/// list is empty.
pub fn decompose(
    root: &ZykovGraph,
    depth_limit: u32,
    reference_ub: NumNodes,
    deadline: &Deadline,
) -> Vec<ZykovGraph> {
    let mut tasks = Vec::new();
    expand(root, 0, depth_limit, reference_ub, deadline, &mut tasks);

    debug!(
        "decomposition to depth {depth_limit} produced {} tasks",
        tasks.len()
    );
    tasks
}

fn expand(
    graph: &ZykovGraph,
    depth: u32,
    depth_limit: u32,
    reference_ub: NumNodes,
    deadline: &Deadline,
    tasks: &mut Vec<ZykovGraph>,
) {
    if deadline.expired() {
        return;
    }

    if depth >= depth_limit {
        tasks.push(graph.clone());
        return;
    }

    let (lower, _) = max_clique(graph);
    let (upper, _) = dsatur_coloring(graph);

    if lower == upper || lower >= reference_ub {
        return;
    }

    let Some((v1, v2)) = select_branching_pair(graph) else {
        return;
    };

    expand(
        &graph.merge_vertices(v1, v2),
        depth + 1,
        depth_limit,
        reference_ub,
        deadline,
        tasks,
    );
    expand(
        &graph.add_edge(v1, v2),
        depth + 1,
        depth_limit,
        reference_ub,
        deadline,
        tasks,
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use std::time::Duration;

    fn far_deadline() -> Deadline {
        Deadline::starting_now(Duration::from_secs(60))
    }

    #[test]
    fn depth_zero_returns_the_root() {
        let root = zykov_of(&petersen());
        let tasks = decompose(&root, 0, INFINITY, &far_deadline());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].number_of_nodes(), 10);
    }

    #[test]
    fn gap_nodes_fill_the_whole_frontier() {
        // the Grötzsch graph keeps lb < ub on every node of the first two
        // levels (clique number 3 at most, chromatic number 4), so depth 2
        // collects the full frontier of four subproblems
        let root = zykov_of(&groetzsch());
        let tasks = decompose(&root, 2, INFINITY, &far_deadline());

        assert_eq!(tasks.len(), 4);
        assert!(tasks.iter().all(|t| t.original_nodes() == 11));
    }

    #[test]
    fn petersen_resolves_within_the_decomposition() {
        // both depth-1 children of the Petersen graph close their gap, so
        // the decomposer hands back nothing and the scheduler falls back to
        // the root task
        let tasks = decompose(&zykov_of(&petersen()), 2, INFINITY, &far_deadline());
        assert!(tasks.is_empty());
    }

    #[test]
    fn resolved_branches_are_not_collected() {
        // both depth-1 children of C5 close the gap (lb == ub == 3), so the
        // whole decomposition resolves and the caller must fall back
        let tasks = decompose(&zykov_of(&cycle(5)), 2, INFINITY, &far_deadline());
        assert!(tasks.is_empty());
    }

    #[test]
    fn cliques_produce_no_tasks() {
        let tasks = decompose(&zykov_of(&complete(4)), 2, INFINITY, &far_deadline());
        assert!(tasks.is_empty());
    }

    #[test]
    fn tight_reference_bound_prunes_everything() {
        // lb(Petersen) = 2, so any reference upper bound of 2 prunes the root
        let tasks = decompose(&zykov_of(&petersen()), 2, 2, &far_deadline());
        assert!(tasks.is_empty());
    }

    #[test]
    fn expired_deadline_stops_expansion() {
        let deadline = Deadline::starting_now(Duration::ZERO);
        let tasks = decompose(&zykov_of(&petersen()), 2, INFINITY, &deadline);
        assert!(tasks.is_empty());
    }

    #[test]
    fn decomposition_is_deterministic() {
        let root = zykov_of(&groetzsch());

        let fingerprint = |tasks: &[ZykovGraph]| {
            tasks
                .iter()
                .map(|t| {
                    (
                        t.number_of_nodes(),
                        t.vertices()
                            .map(|u| t.neighbors_of(u).collect_vec())
                            .collect_vec(),
                    )
                })
                .collect_vec()
        };

        let first = decompose(&root, 3, INFINITY, &far_deadline());
        let second = decompose(&root, 3, INFINITY, &far_deadline());
        assert_eq!(fingerprint(&first), fingerprint(&second));
    }
}
