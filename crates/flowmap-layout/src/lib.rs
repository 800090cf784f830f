#![forbid(unsafe_code)]

//! Headless static layouts for weighted money-flow graphs.
//!
//! Three independent strategies share one read-only [`Graph`] and [`Adjacency`]:
//! a ForceAtlas2-style force simulation, a circular layout and a radial (BFS ring) layout.
//! None of them performs I/O; each returns a complete [`LayoutResult`] or an error.

pub mod algo;
pub mod error;
pub mod graph;
mod rng;

pub use algo::{Algorithm, CircularOptions, ForceAtlas2Options, LayoutKind, RadialOptions};
pub use error::{Error, Result};
pub use graph::{
    Adjacency, Bounds, Edge, Graph, LayoutResult, Neighbor, Node, Point, WeightedEdge, edge_weight,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless layout entry point.
pub fn layout(
    graph: &Graph,
    adjacency: &Adjacency,
    algorithm: &Algorithm,
) -> Result<LayoutResult> {
    match algorithm {
        Algorithm::ForceAtlas2(opts) => algo::forceatlas2::layout(graph, adjacency, opts),
        Algorithm::Circular(opts) => algo::circular::layout(graph, opts),
        Algorithm::Radial(opts) => algo::radial::layout(graph, adjacency, opts),
    }
}

pub(crate) fn ensure_same_graph(graph: &Graph, adjacency: &Adjacency) -> Result<()> {
    if graph.node_count() != adjacency.node_count() {
        return Err(Error::AdjacencyMismatch {
            graph_nodes: graph.node_count(),
            adjacency_nodes: adjacency.node_count(),
        });
    }
    Ok(())
}
