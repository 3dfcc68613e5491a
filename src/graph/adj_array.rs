use super::*;

/// Mutable simple graph used at the edges of the system: parsing, random
/// instance generation, and as the input to the root [`ZykovGraph`] snapshot.
#[derive(Debug, Default, Clone)]
pub struct AdjArray {
    adj: Vec<Vec<Node>>,
    number_of_edges: NumEdges,
}

impl GraphNodeOrder for AdjArray {
    fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }
}

impl GraphEdgeOrder for AdjArray {
    fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }
}

impl AdjacencyList for AdjArray {
    fn neighbors_of(&self, u: Node) -> &[Node] {
        &self.adj[u as usize]
    }
}

impl AdjacencyTest for AdjArray {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adj[u as usize].contains(&v)
    }
}

impl GraphNew for AdjArray {
    fn new(n: NumNodes) -> Self {
        Self {
            adj: vec![Vec::new(); n as usize],
            number_of_edges: 0,
        }
    }
}

impl GraphEdgeEditing for AdjArray {
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool {
        assert_ne!(u, v);
        assert!(v < self.number_of_nodes());

        if self.has_edge(u, v) {
            return false;
        }

        self.adj[u as usize].push(v);
        self.adj[v as usize].push(u);
        self.number_of_edges += 1;
        true
    }
}

impl AdjArray {
    /// All edges with `u < v`, in adjacency order
    pub fn ordered_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices().flat_map(move |u| {
            self.neighbors_of(u)
                .iter()
                .filter_map(move |&v| (u < v).then_some(Edge(u, v)))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn new() {
        for n in 1..20 {
            let graph = AdjArray::new(n);
            assert_eq!(graph.number_of_nodes(), n);
            assert_eq!(graph.number_of_edges(), 0);
            assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
        }
    }

    #[test]
    fn add_edges() {
        let mut graph = AdjArray::new(4);
        graph.add_edges([(0, 1), (1, 2), (3, 1)]);

        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.degrees().collect_vec(), [1, 3, 1, 1]);
        assert!(graph.has_edge(1, 0));
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(graph.max_degree(), 3);
    }

    #[test]
    fn duplicate_edges_are_rejected() {
        let mut graph = AdjArray::new(3);
        assert!(graph.try_add_edge(0, 1));
        assert!(!graph.try_add_edge(1, 0));
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn ordered_edges() {
        let mut graph = AdjArray::new(4);
        graph.add_edges([(2, 0), (3, 2), (0, 1)]);

        let edges = graph.ordered_edges().sorted().collect_vec();
        assert_eq!(edges, [Edge(0, 1), Edge(0, 2), Edge(2, 3)]);
    }
}
