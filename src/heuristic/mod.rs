pub mod dsatur;
pub mod max_clique;

pub use dsatur::dsatur_coloring;
pub use max_clique::max_clique;
