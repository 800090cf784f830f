use crate::algo::ForceAtlas2Options;
use crate::error::Result;
use crate::graph::{Adjacency, Graph, LayoutResult, Point};

mod state;

use state::SimulationState;

/// Runs the force simulation for exactly `opts.iterations` steps and returns positions whose
/// bounding box is centered on the origin.
///
/// Each step accumulates all-pairs repulsion, edge attraction and gravity into a net force per
/// node, then advances every node with the adaptive swing/traction speed. Nothing is published
/// before the final centering pass.
pub fn layout(
    graph: &Graph,
    adjacency: &Adjacency,
    opts: &ForceAtlas2Options,
) -> Result<LayoutResult> {
    opts.validate()?;
    crate::ensure_same_graph(graph, adjacency)?;

    if graph.is_empty() {
        return Ok(LayoutResult::default());
    }

    let mut sim = SimulationState::seeded(graph, opts);
    let edges = adjacency.edges();

    let mut global_speed = 0.0f64;
    for iteration in 0..opts.iterations {
        sim.clear_forces();
        sim.apply_repulsion(opts);
        sim.apply_attraction(edges, opts);
        sim.apply_gravity(opts);
        global_speed = sim.step(opts);

        if opts.progress_interval > 0 && iteration % opts.progress_interval == 0 {
            tracing::debug!(
                iteration,
                iterations = opts.iterations,
                global_speed,
                "forceatlas2 progress"
            );
        }
    }

    sim.center();

    let mut result = LayoutResult::with_capacity(graph.node_count());
    for (node, p) in graph.nodes().iter().zip(&sim.positions) {
        result.positions.insert(node.id.clone(), Point::new(p.x, p.y));
    }

    tracing::debug!(
        nodes = result.len(),
        edges = edges.len(),
        final_global_speed = global_speed,
        "forceatlas2 finished"
    );

    Ok(result)
}
