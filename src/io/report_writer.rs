use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::graph::{NumEdges, NumNodes};
use crate::utils::Color;

pub const SOLVER_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Everything the result file records about a finished run. The key order
/// and formatting are fixed; downstream tabulation scripts parse this file.
#[derive(Debug)]
pub struct SolutionReport<'a> {
    /// Instance base name without directory and extension
    pub instance_name: String,
    pub cmd_line: String,
    pub number_of_vertices: NumNodes,
    /// Edges of the original input graph
    pub number_of_edges: NumEdges,
    pub time_limit_sec: f64,
    pub workers: usize,
    pub threads_per_worker: usize,
    pub wall_time_sec: f64,
    /// False iff the deadline cut the search short
    pub completed: bool,
    pub num_colors: NumNodes,
    /// One entry per original vertex
    pub coloring: &'a [Color],
}

impl SolutionReport<'_> {
    pub fn try_write<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "problem_instance_file_name: {}", self.instance_name)?;
        writeln!(writer, "cmd_line: {}", self.cmd_line)?;
        writeln!(writer, "solver_version: {SOLVER_VERSION}")?;
        writeln!(writer, "number_of_vertices: {}", self.number_of_vertices)?;
        writeln!(writer, "number_of_edges: {}", self.number_of_edges)?;
        writeln!(writer, "time_limit_sec: {}", self.time_limit_sec)?;
        writeln!(writer, "number_of_mpi_processes: {}", self.workers)?;
        writeln!(
            writer,
            "number_of_threads_per_process: {}",
            self.threads_per_worker
        )?;
        writeln!(writer, "wall_time_sec: {}", self.wall_time_sec)?;
        writeln!(
            writer,
            "is_within_time_limit: {}",
            if self.completed { "true" } else { "false" }
        )?;
        writeln!(writer, "number_of_colors: {}", self.num_colors)?;

        for (vertex, color) in self.coloring.iter().enumerate() {
            writeln!(writer, "{vertex} {color}")?;
        }

        Ok(())
    }

    pub fn try_write_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write(writer)
    }
}
