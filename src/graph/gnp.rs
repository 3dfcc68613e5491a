use crate::graph::*;
use rand::Rng;
use rand_distr::Geometric;

pub trait GnpGenerator: Sized {
    /// Generates a Gilbert (also, wrongly, known as Erdos-Renyi) graph:
    /// `G(n,p)` contains n nodes and each of the `n(n-1)/2` possible edges
    /// exists independently with probability `p`.
    fn random_gnp<R: Rng>(rng: &mut R, n: Node, p: f64) -> Self;
}

impl<G> GnpGenerator for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn random_gnp<R: Rng>(rng: &mut R, n: Node, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p));
        let mut graph = Self::new(n);

        if p <= 0.0 {
            return graph;
        }

        // walk the n*n index grid and keep only upper-triangle cells; one
        // geometric draw jumps over all failed coin flips at once, so dense
        // and sparse regimes cost the same per surviving edge
        let skips = Geometric::new(p).unwrap();
        let cells = (n as u64) * (n as u64);
        let mut cell = rng.sample(skips);

        while cell < cells {
            let u = (cell / n as u64) as Node;
            let v = (cell % n as u64) as Node;
            if u < v {
                graph.add_edge(u, v);
            }

            cell = cell.saturating_add(1).saturating_add(rng.sample(skips));
        }

        graph
    }
}
