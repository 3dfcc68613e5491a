use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};
use std::time::{Duration, Instant};

use ::log::trace;

use crate::graph::*;
use crate::heuristic::{dsatur_coloring, max_clique};
use crate::utils::{Color, ColoringSolution};

use super::select_branching_pair;

/// Wall-clock budget of a run, fixed at startup and read-only afterwards
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn starting_now(limit: Duration) -> Self {
        Self::from_start(Instant::now(), limit)
    }

    /// Budget measured from an externally taken start time (typically
    /// program startup)
    pub fn from_start(start: Instant, limit: Duration) -> Self {
        Self { start, limit }
    }

    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }
}

/// Thresholds steering when the recursion forks children into tasks instead
/// of exploring them on the current executor. Tuning knobs, not correctness
/// constraints; they bound the number of live tasks per subproblem.
#[derive(Debug, Clone, Copy)]
pub struct TaskTuning {
    /// Below this many current vertices both children are explored inline
    pub min_task_vertices: NumNodes,
    /// At this recursion depth and beyond both children are explored inline
    pub max_task_depth: u32,
}

impl Default for TaskTuning {
    fn default() -> Self {
        Self {
            min_task_vertices: 30,
            max_task_depth: 4,
        }
    }
}

/// Best coloring found so far by the tasks of one worker.
///
/// A single mutex guards the color count and the coloring vector as a pair,
/// so readers always observe a consistent solution; the improving writer
/// keeps the lock across the merge-group translation.
pub struct SharedSolution {
    inner: Mutex<ColoringSolution>,
}

impl SharedSolution {
    pub fn new(orig_n: NumNodes) -> Self {
        Self {
            inner: Mutex::new(ColoringSolution::new(orig_n)),
        }
    }

    /// Installs the coloring if it beats the incumbent. Returns the number
    /// of colors of the best solution after the attempt, which doubles as
    /// the bound for the caller's prune test.
    pub fn try_improve(
        &self,
        num_colors: NumNodes,
        graph: &ZykovGraph,
        current_colors: &[Color],
    ) -> NumNodes {
        let mut best = self.inner.lock().unwrap();

        if num_colors < best.num_colors() {
            best.record(num_colors, graph, current_colors);
        }

        best.num_colors()
    }

    pub fn num_colors(&self) -> NumNodes {
        self.inner.lock().unwrap().num_colors()
    }

    pub fn into_inner(self) -> ColoringSolution {
        self.inner.into_inner().unwrap()
    }
}

/// Everything a branch-and-bound task needs besides its snapshot: the
/// deadline, the worker's shared best, the process-wide completion flag and
/// the task-spawn thresholds.
pub struct RunContext<'a> {
    pub best: &'a SharedSolution,
    pub deadline: Deadline,
    pub completed: &'a AtomicBool,
    pub tuning: TaskTuning,
}

impl<'a> RunContext<'a> {
    pub fn new(
        best: &'a SharedSolution,
        deadline: Deadline,
        completed: &'a AtomicBool,
        tuning: TaskTuning,
    ) -> Self {
        Self {
            best,
            deadline,
            completed,
            tuning,
        }
    }

    /// Cooperative cancellation test. On an expired deadline the completion
    /// flag drops to false; the transition is monotonic, so a relaxed store
    /// is sufficient.
    fn deadline_exceeded(&self) -> bool {
        if self.deadline.expired() {
            self.completed.store(false, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}

/// Explores the Zykov tree under `graph` depth-first, pruning against the
/// clique lower bound and the shared incumbent.
///
/// Children are explored merge-first. While the snapshot is large and the
/// depth small (see [`TaskTuning`]) the two children are submitted as a
/// fork/join pair on the current rayon pool and awaited together; otherwise
/// the recursion stays on this executor.
pub fn branch_and_bound(graph: &ZykovGraph, ctx: &RunContext, depth: u32) {
    if ctx.deadline_exceeded() {
        return;
    }

    let (lower, _clique) = max_clique(graph);
    let (upper, coloring) = dsatur_coloring(graph);

    trace!(
        "node depth={depth} n={} lb={lower} ub={upper}",
        graph.number_of_nodes()
    );

    let incumbent = ctx.best.try_improve(upper, graph, &coloring);

    // subtree resolved exactly
    if lower == upper {
        return;
    }

    // the incumbent cannot be beaten below this node
    if lower >= incumbent {
        return;
    }

    let Some((v1, v2)) = select_branching_pair(graph) else {
        return;
    };

    let same_color = graph.merge_vertices(v1, v2);
    let different_color = graph.add_edge(v1, v2);

    let spawn_children = graph.number_of_nodes() >= ctx.tuning.min_task_vertices
        && depth < ctx.tuning.max_task_depth;

    if spawn_children {
        rayon::join(
            || branch_and_bound(&same_color, ctx, depth + 1),
            || branch_and_bound(&different_color, ctx, depth + 1),
        );
    } else {
        branch_and_bound(&same_color, ctx, depth + 1);
        branch_and_bound(&different_color, ctx, depth + 1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn solve_serial(graph: &AdjArray) -> (ColoringSolution, bool) {
        let best = SharedSolution::new(graph.number_of_nodes());
        let completed = AtomicBool::new(true);
        let ctx = RunContext::new(
            &best,
            Deadline::starting_now(Duration::from_secs(60)),
            &completed,
            TaskTuning::default(),
        );

        branch_and_bound(&zykov_of(graph), &ctx, 0);
        (best.into_inner(), completed.load(Ordering::Relaxed))
    }

    #[test]
    fn known_instances() {
        for (graph, chromatic) in [
            (triangle(), 3),
            (cycle(4), 2),
            (cycle(5), 3),
            (petersen(), 3),
            (AdjArray::new(5), 1),
            (complete(6), 6),
        ] {
            let (solution, completed) = solve_serial(&graph);

            assert!(completed);
            assert_eq!(solution.num_colors(), chromatic);
            assert!(solution.is_complete());
            assert!(solution.is_proper_for(&graph));
            assert_eq!(solution.colors_used(), chromatic);
        }
    }

    #[test]
    fn empty_graph_resolves_to_zero_colors() {
        let best = SharedSolution::new(0);
        let completed = AtomicBool::new(true);
        let ctx = RunContext::new(
            &best,
            Deadline::starting_now(Duration::from_secs(60)),
            &completed,
            TaskTuning::default(),
        );

        branch_and_bound(&ZykovGraph::new(0), &ctx, 0);

        assert!(completed.load(Ordering::Relaxed));
        assert_eq!(best.num_colors(), 0);
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        let mut rng = Pcg64::seed_from_u64(0xb0b);

        for _ in 0..25 {
            let graph = AdjArray::random_gnp(&mut rng, 11, 0.4);
            let (solution, completed) = solve_serial(&graph);

            assert!(completed);
            assert_eq!(solution.num_colors(), brute_force_chromatic_number(&graph));
            assert!(solution.is_proper_for(&graph));
        }
    }

    #[test]
    fn heuristic_sandwich_at_the_root() {
        let mut rng = Pcg64::seed_from_u64(0x5a4d);

        for _ in 0..10 {
            let graph = AdjArray::random_gnp(&mut rng, 10, 0.5);
            let chromatic = brute_force_chromatic_number(&graph);

            let snapshot = zykov_of(&graph);
            let (lower, _) = crate::heuristic::max_clique(&snapshot);
            let (upper, _) = crate::heuristic::dsatur_coloring(&snapshot);

            assert!(lower <= chromatic);
            assert!(chromatic <= upper);
        }
    }

    #[test]
    fn expired_deadline_reports_incomplete() {
        let graph = petersen();
        let best = SharedSolution::new(graph.number_of_nodes());
        let completed = AtomicBool::new(true);
        let ctx = RunContext::new(
            &best,
            Deadline::starting_now(Duration::ZERO),
            &completed,
            TaskTuning::default(),
        );

        branch_and_bound(&zykov_of(&graph), &ctx, 0);

        assert!(!completed.load(Ordering::Relaxed));
        assert_eq!(best.num_colors(), INFINITY);
    }

    #[test]
    fn shared_solution_keeps_the_better_incumbent() {
        let graph = zykov_of(&cycle(4));
        let best = SharedSolution::new(4);

        assert_eq!(best.try_improve(3, &graph, &[0, 1, 2, 1]), 3);
        assert_eq!(best.try_improve(2, &graph, &[0, 1, 0, 1]), 2);
        // a worse candidate leaves the incumbent untouched
        assert_eq!(best.try_improve(3, &graph, &[0, 1, 2, 1]), 2);

        let solution = best.into_inner();
        assert_eq!(solution.num_colors(), 2);
        assert_eq!(solution.coloring(), [0, 1, 0, 1]);
    }

    #[test]
    fn zykov_soundness_on_the_branching_pair() {
        let mut rng = Pcg64::seed_from_u64(0x50d);

        for _ in 0..10 {
            let graph = AdjArray::random_gnp(&mut rng, 9, 0.35);
            let snapshot = zykov_of(&graph);
            let Some((v1, v2)) = select_branching_pair(&snapshot) else {
                continue;
            };

            let merged = current_graph_of(&snapshot.merge_vertices(v1, v2));
            let with_edge = current_graph_of(&snapshot.add_edge(v1, v2));

            assert_eq!(
                brute_force_chromatic_number(&graph),
                brute_force_chromatic_number(&merged)
                    .min(brute_force_chromatic_number(&with_edge))
            );
        }
    }
}
