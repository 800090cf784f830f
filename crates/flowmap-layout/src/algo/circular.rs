use crate::algo::CircularOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point};

/// Places node `i` of `n` at angle `i / n * 2π` on a circle of radius `n * radius_per_node`.
///
/// A single node sits at the origin.
pub fn layout(graph: &Graph, opts: &CircularOptions) -> Result<LayoutResult> {
    opts.validate()?;

    let n = graph.node_count();
    let mut result = LayoutResult::with_capacity(n);
    if n == 1 {
        result
            .positions
            .insert(graph.nodes()[0].id.clone(), Point::ORIGIN);
        return Ok(result);
    }

    let radius = n as f64 * opts.radius_per_node;
    for (i, node) in graph.nodes().iter().enumerate() {
        let angle = (i as f64 / n as f64) * std::f64::consts::TAU;
        result
            .positions
            .insert(node.id.clone(), Point::polar(radius, angle));
    }
    Ok(result)
}
