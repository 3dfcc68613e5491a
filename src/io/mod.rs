pub mod col_reader;
pub use col_reader::*;

pub mod report_writer;
pub use report_writer::SolutionReport;
