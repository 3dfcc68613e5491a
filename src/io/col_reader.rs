use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Lines},
    path::Path,
};

use crate::graph::{Edge, GraphEdgeEditing, GraphNew, NumEdges, NumNodes};

pub type Result<T> = std::io::Result<T>;

pub trait GraphColReader: Sized {
    fn try_read_col<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_col_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl<G> GraphColReader for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn try_read_col<R: BufRead>(reader: R) -> Result<Self> {
        let mut col_reader = ColReader::try_new(reader)?;
        let mut graph = Self::new(col_reader.number_of_nodes());

        while let Some(Edge(u, v)) = col_reader.try_next_edge()? {
            // duplicate edges are absorbed by set semantics
            graph.try_add_edge(u, v);
        }

        Ok(graph)
    }

    fn try_read_col_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_col(buf_reader)
    }
}

/// Line-oriented DIMACS `.col` parser: `c` comments, one `p <name> n m`
/// header, `e u v` edges with 1-indexed endpoints.
pub struct ColReader<R> {
    lines: Lines<R>,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
}

macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(std::io::Error::new($kind, $info));
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

impl<R: BufRead> ColReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut col_reader = Self {
            lines: reader.lines(),
            number_of_nodes: 0,
            number_of_edges: 0,
        };

        (col_reader.number_of_nodes, col_reader.number_of_edges) = col_reader.parse_header()?;
        Ok(col_reader)
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }

    /// Edge count announced by the header; informational only
    pub fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    /// Next edge with 0-based endpoints, or `None` at end of input
    pub fn try_next_edge(&mut self) -> Result<Option<Edge>> {
        let Some(line) = self.next_relevant_line()? else {
            return Ok(None);
        };

        let mut parts = line.split(' ').filter(|t| !t.is_empty());

        raise_error_unless!(
            parts.next() == Some("e"),
            ErrorKind::InvalidData,
            format!("Unexpected line: {line:?}")
        );

        let from: NumNodes = parse_next_value!(parts, "Source node");
        let dest: NumNodes = parse_next_value!(parts, "Target node");

        raise_error_unless!(
            (1..=self.number_of_nodes).contains(&from) && (1..=self.number_of_nodes).contains(&dest),
            ErrorKind::InvalidData,
            format!("Edge endpoint out of range in line: {line:?}")
        );

        raise_error_unless!(
            from != dest,
            ErrorKind::InvalidData,
            format!("Self-loop in line: {line:?}")
        );

        Ok(Some(Edge(from - 1, dest - 1)))
    }

    /// Skips comments and blank lines
    fn next_relevant_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) if line.starts_with('c') || line.trim().is_empty() => continue,
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn parse_header(&mut self) -> Result<(NumNodes, NumEdges)> {
        let line = self.next_relevant_line()?;

        raise_error_unless!(line.is_some(), ErrorKind::InvalidData, "No header found");
        let line = line.unwrap();

        let mut parts = line.split(' ').filter(|t| !t.is_empty());

        raise_error_unless!(
            parts.next() == Some("p"),
            ErrorKind::InvalidData,
            "Invalid header found; line should start with p"
        );

        raise_error_unless!(
            parts.next().is_some(),
            ErrorKind::InvalidData,
            "Invalid header found; no format name"
        );

        let number_of_nodes = parse_next_value!(parts, "Header>Number of nodes");
        let number_of_edges = parse_next_value!(parts, "Header>Number of edges");

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            "Invalid header found; expected end of line"
        );

        Ok((number_of_nodes, number_of_edges))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::*;

    fn read(input: &str) -> Result<AdjArray> {
        AdjArray::try_read_col(input.as_bytes())
    }

    #[test]
    fn parses_triangle() {
        const DEMO: &str = "c sample instance\np edge 3 3\ne 1 2\nc interleaved comment\ne 2 3\ne 1 3\n";
        let graph = read(DEMO).unwrap();

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 3);
        assert!(graph.has_edge(0, 1) && graph.has_edge(1, 2) && graph.has_edge(0, 2));
    }

    #[test]
    fn header_reports_counts() {
        let reader = ColReader::try_new("c x\n p  edge  10  9 \ne 1 2\n".as_bytes()).unwrap();
        assert_eq!(reader.number_of_nodes(), 10);
        assert_eq!(reader.number_of_edges(), 9);
    }

    #[test]
    fn duplicate_edges_are_absorbed() {
        let graph = read("p edge 2 3\ne 1 2\ne 1 2\ne 2 1\n").unwrap();
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(read("e 1 2\n").is_err());
        assert!(read("").is_err());
    }

    #[test]
    fn malformed_lines_are_errors() {
        assert!(read("p edge 3 1\nx 1 2\n").is_err());
        assert!(read("p edge 3 1\ne 1\n").is_err());
        assert!(read("p edge 3 1\ne one 2\n").is_err());
        assert!(read("p edge 3 1 7\ne 1 2\n").is_err());
    }

    #[test]
    fn out_of_range_endpoints_are_errors() {
        assert!(read("p edge 3 1\ne 1 4\n").is_err());
        assert!(read("p edge 3 1\ne 0 2\n").is_err());
    }

    #[test]
    fn self_loops_are_errors() {
        assert!(read("p edge 3 1\ne 2 2\n").is_err());
    }

    #[test]
    fn vertices_become_zero_based() {
        let graph = read("p edge 4 2\ne 1 4\ne 2 3\n").unwrap();
        assert!(graph.has_edge(0, 3));
        assert!(graph.has_edge(1, 2));
    }
}
