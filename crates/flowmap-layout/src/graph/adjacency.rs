use super::Graph;

/// Attraction weight of an edge: `log10(max(1, amount))`.
///
/// Missing, zero, negative and non-finite amounts are treated as `1`, which yields weight `0`.
pub fn edge_weight(amount: f64) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }
    amount.max(1.0).log10()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub weight: f64,
}

/// An edge resolved to node indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// Weighted, undirected adjacency built once per run and shared read-only by the strategies.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    neighbors: Vec<Vec<Neighbor>>,
    edges: Vec<WeightedEdge>,
    skipped_edges: usize,
}

impl Adjacency {
    /// Both endpoints of every edge get a symmetric entry, in edge order. Edges that reference an
    /// id missing from the node list are skipped.
    pub fn build(graph: &Graph) -> Self {
        let mut neighbors: Vec<Vec<Neighbor>> = vec![Vec::new(); graph.node_count()];
        let mut edges: Vec<WeightedEdge> = Vec::with_capacity(graph.edge_count());
        let mut skipped_edges = 0usize;

        for e in graph.edges() {
            let (Some(a), Some(b)) = (graph.index_of(&e.source), graph.index_of(&e.target)) else {
                tracing::debug!(
                    source = %e.source,
                    target = %e.target,
                    "skipping edge with unknown endpoint"
                );
                skipped_edges += 1;
                continue;
            };
            let weight = edge_weight(e.amount);
            neighbors[a].push(Neighbor { index: b, weight });
            neighbors[b].push(Neighbor { index: a, weight });
            edges.push(WeightedEdge { a, b, weight });
        }

        Self {
            neighbors,
            edges,
            skipped_edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbors of the node at `index`, in edge order. Out-of-range indices have none.
    pub fn neighbors(&self, index: usize) -> &[Neighbor] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }
}
