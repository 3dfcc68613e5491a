use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{ensure, Context};
use itertools::Itertools;
use log::info;
use structopt::StructOpt;

use ::zykov::{
    log::build_logger_for_level,
    prelude::*,
};

#[derive(StructOpt)]
#[structopt(
    name = "solver",
    about = "Exact graph coloring via parallel branch-and-bound on the Zykov tree"
)]
struct Opts {
    /// Instance in DIMACS .col format
    input: PathBuf,

    /// Wall-clock time limit in seconds
    time_limit: f64,

    /// Number of independent workers
    #[structopt(short = "w", long, default_value = "1")]
    workers: usize,

    /// Cooperative executors per worker
    #[structopt(short = "t", long, env = "ZYKOV_NUM_THREADS", default_value = "1")]
    threads: usize,

    /// Search-tree depth of the static task decomposition
    #[structopt(short = "d", long, default_value = "2")]
    decomposition_depth: u32,

    /// Below this many vertices children are explored inline
    #[structopt(long, default_value = "30")]
    min_task_vertices: NumNodes,

    /// At this recursion depth and beyond children are explored inline
    #[structopt(long, default_value = "4")]
    max_task_depth: u32,

    /// Output file; defaults to <instance>_<workers>.output
    #[structopt(short = "o", long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[structopt(short = "v", long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let start = Instant::now();
    let opts = Opts::from_args();

    build_logger_for_level(if opts.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    ensure!(opts.time_limit > 0.0, "time limit must be positive");
    ensure!(opts.workers >= 1, "at least one worker is required");
    ensure!(opts.threads >= 1, "at least one thread per worker is required");

    let graph = AdjArray::try_read_col_file(&opts.input)
        .with_context(|| format!("cannot read instance {}", opts.input.display()))?;
    info!(
        "loaded {} with n={} m={}",
        opts.input.display(),
        graph.number_of_nodes(),
        graph.number_of_edges()
    );

    let config = SolverConfig {
        workers: opts.workers,
        threads_per_worker: opts.threads,
        deadline: Deadline::from_start(start, Duration::from_secs_f64(opts.time_limit)),
        decomposition_depth: opts.decomposition_depth,
        tuning: TaskTuning {
            min_task_vertices: opts.min_task_vertices,
            max_task_depth: opts.max_task_depth,
        },
    };

    let outcome = solve(&graph, &config);
    info!(
        "number_of_colors={} completed={}",
        outcome.num_colors, outcome.completed
    );

    let instance_name = opts
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| opts.input.display().to_string());

    let report = SolutionReport {
        instance_name: instance_name.clone(),
        cmd_line: std::env::args().join(" "),
        number_of_vertices: graph.number_of_nodes(),
        number_of_edges: graph.number_of_edges(),
        time_limit_sec: opts.time_limit,
        workers: opts.workers,
        threads_per_worker: opts.threads,
        wall_time_sec: start.elapsed().as_secs_f64(),
        completed: outcome.completed,
        num_colors: outcome.num_colors,
        coloring: &outcome.coloring,
    };

    let output_path = opts
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}_{}.output", instance_name, opts.workers)));

    report
        .try_write_file(&output_path)
        .with_context(|| format!("cannot write output file {}", output_path.display()))?;
    info!("output written to {}", output_path.display());

    Ok(())
}
