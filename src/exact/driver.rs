use std::sync::{
    atomic::{AtomicBool, Ordering},
    Barrier,
};
use std::time::Duration;

use ::log::{debug, info};

use crate::graph::*;
use crate::utils::{Color, UNCOLORED};

use super::{
    branch_and_bound, decompose, run_worker_team, Deadline, Exchange, RunContext, SharedSolution,
    TaskTuning,
};

/// Knobs of a solver run; worker and thread counts come from the launcher,
/// the rest defaults to the tuning the search was calibrated with.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Coarse level: independent workers sharing no search state
    pub workers: usize,
    /// Fine level: cooperative executors inside each worker
    pub threads_per_worker: usize,
    pub deadline: Deadline,
    /// Depth at which the single-component regime slices the search tree
    pub decomposition_depth: u32,
    pub tuning: TaskTuning,
}

impl SolverConfig {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            workers: 1,
            threads_per_worker: 1,
            deadline: Deadline::starting_now(time_limit),
            decomposition_depth: 2,
            tuning: TaskTuning::default(),
        }
    }
}

/// Final result handed back to the I/O shell
#[derive(Debug, Clone)]
pub struct ColoringOutcome {
    /// Chromatic number if `completed`, best known value otherwise
    /// ([`INFINITY`] when no coloring was found at all)
    pub num_colors: NumNodes,
    /// One color per original vertex
    pub coloring: Vec<Color>,
    /// False iff the deadline cut the search short
    pub completed: bool,
}

/// Solves one instance: splits it into connected components, distributes
/// the work over the configured worker team, and reduces the per-worker
/// results into a single coloring.
pub fn solve(graph: &AdjArray, config: &SolverConfig) -> ColoringOutcome {
    assert!(config.workers >= 1);
    assert!(config.threads_per_worker >= 1);

    let root = ZykovGraph::from_graph(graph);

    if root.is_empty() {
        return ColoringOutcome {
            num_colors: 0,
            coloring: Vec::new(),
            completed: true,
        };
    }

    let components = root.connected_components();
    let completed = AtomicBool::new(true);

    info!(
        "solve n={} m={} components={} workers={} threads={}",
        graph.number_of_nodes(),
        graph.number_of_edges(),
        components.len(),
        config.workers,
        config.threads_per_worker
    );

    let (num_colors, coloring) = if components.len() > 1 {
        solve_components(&root, &components, config, &completed)
    } else {
        solve_single_component(&root, &components[0], config, &completed)
    };

    ColoringOutcome {
        num_colors,
        coloring,
        completed: completed.load(Ordering::Relaxed),
    }
}

fn build_pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("cannot build worker thread pool")
}

/// Regime 1: components are assigned round-robin by index. Each owning
/// worker colors its components one after the other (each search internally
/// task-parallel) and leaves foreign vertices at -1; the team then max-
/// reduces the color count and the coloring component-wise.
fn solve_components(
    root: &ZykovGraph,
    components: &[Vec<Node>],
    config: &SolverConfig,
    completed: &AtomicBool,
) -> (NumNodes, Vec<Color>) {
    let orig_n = root.original_nodes();
    let workers = config.workers;

    let reduce = Exchange::new(workers);
    let end_of_run = Barrier::new(workers);

    let mut results = run_worker_team(workers, |rank| {
        let pool = build_pool(config.threads_per_worker);

        let mut local_best: NumNodes = 0;
        let mut local_coloring = vec![UNCOLORED; orig_n as usize];

        for (index, component) in components.iter().enumerate() {
            if index % workers != rank {
                continue;
            }

            let subgraph = root.extract_subgraph(component);
            let best = SharedSolution::new(orig_n);
            let ctx = RunContext::new(&best, config.deadline, completed, config.tuning);

            pool.install(|| branch_and_bound(&subgraph, &ctx, 0));

            let solution = best.into_inner();
            debug!(
                "rank {rank} colored component {index} (n={}) with {} colors",
                component.len(),
                solution.num_colors()
            );

            local_best = local_best.max(solution.num_colors());
            for (own, &color) in local_coloring.iter_mut().zip(solution.coloring()) {
                if color != UNCOLORED {
                    *own = color;
                }
            }
        }

        // -1 on non-owned positions makes component-wise max a merge
        let reduced = reduce.all_reduce(
            rank,
            (local_best, local_coloring),
            |(a_best, mut a_col), (b_best, b_col)| {
                for (own, other) in a_col.iter_mut().zip(b_col) {
                    *own = (*own).max(other);
                }
                (a_best.max(b_best), a_col)
            },
        );

        end_of_run.wait();
        reduced
    });

    results.swap_remove(0)
}

/// Regime 2: every worker derives the identical task list by decomposing
/// the component, claims the tasks of its rank, and runs them as parallel
/// units against one worker-local incumbent. The team then agrees on the
/// winner via a min-reduce over (colors, rank) and the winner broadcasts
/// its coloring.
fn solve_single_component(
    root: &ZykovGraph,
    component: &[Node],
    config: &SolverConfig,
    completed: &AtomicBool,
) -> (NumNodes, Vec<Color>) {
    let orig_n = root.original_nodes();
    let workers = config.workers;
    let subgraph = root.extract_subgraph(component);

    let min_loc = Exchange::new(workers);
    let winner_coloring = Exchange::new(workers);
    let end_of_run = Barrier::new(workers);

    let mut results = run_worker_team(workers, |rank| {
        let pool = build_pool(config.threads_per_worker);

        let mut tasks = decompose(
            &subgraph,
            config.decomposition_depth,
            INFINITY,
            &config.deadline,
        );
        if tasks.is_empty() {
            tasks.push(subgraph.clone());
        }

        let best = SharedSolution::new(orig_n);
        let ctx = RunContext::new(&best, config.deadline, completed, config.tuning);

        pool.install(|| {
            rayon::scope(|scope| {
                for (index, task) in tasks.iter().enumerate() {
                    if index % workers != rank {
                        continue;
                    }

                    let ctx = &ctx;
                    scope.spawn(move |_| {
                        branch_and_bound(task, ctx, config.decomposition_depth)
                    });
                }
            })
        });

        let local = best.into_inner();
        debug!(
            "rank {rank} finished its share of {} tasks with {} colors",
            tasks.len(),
            local.num_colors()
        );

        let (value, source) = min_loc.all_reduce(rank, (local.num_colors(), rank), |a, b| a.min(b));

        let coloring = winner_coloring.broadcast(
            rank,
            source,
            (rank == source).then(|| local.coloring().to_vec()),
        );

        end_of_run.wait();
        (value, coloring)
    });

    results.swap_remove(0)
}
