use std::error::Error;

use thiserror::Error;

use crate::graph::Node;

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Violations of the structural invariants of a graph snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphInvariantError {
    #[error("adjacency of vertex {0} is not symmetric with vertex {1}")]
    Asymmetric(Node, Node),

    #[error("vertex {0} has a self-loop")]
    SelfLoop(Node),

    #[error("vertex {0} has an empty merge mapping")]
    EmptyMapping(Node),

    #[error("original vertex {0} appears in {1} merge mappings")]
    BrokenPartition(Node, usize),
}
