use std::collections::VecDeque;

use crate::algo::RadialOptions;
use crate::error::Result;
use crate::graph::{Adjacency, Graph, LayoutResult, Point};

/// Concentric BFS rings around the highest-degree node.
///
/// The center (ties broken by input order) sits at the origin; ring `k` holds the nodes at BFS
/// depth `k`, evenly spaced on radius `k * ring_spacing`. Nodes unreachable from the center share
/// one extra ring beyond the deepest reached one, in input order.
pub fn layout(
    graph: &Graph,
    adjacency: &Adjacency,
    opts: &RadialOptions,
) -> Result<LayoutResult> {
    opts.validate()?;
    crate::ensure_same_graph(graph, adjacency)?;

    let Some(center) = center_index(graph) else {
        return Ok(LayoutResult::default());
    };

    let mut rings = bfs_rings(adjacency, center);
    let unreachable: Vec<usize> = {
        let mut placed = vec![false; graph.node_count()];
        for &idx in rings.iter().flatten() {
            placed[idx] = true;
        }
        (0..graph.node_count()).filter(|&i| !placed[i]).collect()
    };
    if !unreachable.is_empty() {
        tracing::debug!(
            count = unreachable.len(),
            ring = rings.len(),
            "placing disconnected nodes on the outer ring"
        );
        rings.push(unreachable);
    }

    let mut slots: Vec<Point> = vec![Point::ORIGIN; graph.node_count()];
    for (depth, members) in rings.iter().enumerate().skip(1) {
        let radius = depth as f64 * opts.ring_spacing;
        let count = members.len() as f64;
        for (j, &idx) in members.iter().enumerate() {
            let angle = (j as f64 / count) * std::f64::consts::TAU;
            slots[idx] = Point::polar(radius, angle);
        }
    }

    let mut result = LayoutResult::with_capacity(graph.node_count());
    for (node, p) in graph.nodes().iter().zip(slots) {
        result.positions.insert(node.id.clone(), p);
    }
    Ok(result)
}

/// Index of the node with the highest declared degree; the first one wins ties.
pub fn center_index(graph: &Graph) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (idx, node) in graph.nodes().iter().enumerate() {
        match best {
            Some((_, degree)) if node.degree <= degree => {}
            _ => best = Some((idx, node.degree)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Node indices grouped by BFS depth from `start`, visiting neighbors in adjacency order.
fn bfs_rings(adjacency: &Adjacency, start: usize) -> Vec<Vec<usize>> {
    let mut visited = vec![false; adjacency.node_count()];
    let mut rings: Vec<Vec<usize>> = Vec::new();
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    visited[start] = true;
    queue.push_back((start, 0));
    while let Some((idx, depth)) = queue.pop_front() {
        if rings.len() <= depth {
            rings.push(Vec::new());
        }
        rings[depth].push(idx);

        for n in adjacency.neighbors(idx) {
            if !visited[n.index] {
                visited[n.index] = true;
                queue.push_back((n.index, depth + 1));
            }
        }
    }
    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn depth_of(radius: f64, spacing: f64) -> f64 {
        radius / spacing
    }

    #[test]
    fn center_prefers_first_of_tied_max_degree() {
        let g = Graph::new(
            vec![Node::new("a", 1), Node::new("b", 4), Node::new("c", 4)],
            Vec::new(),
        );
        assert_eq!(center_index(&g), Some(1));
        assert_eq!(center_index(&Graph::default()), None);
    }

    #[test]
    fn rings_follow_bfs_depth() {
        // hub - x - y, hub - z; w is disconnected.
        let g = Graph::new(
            vec![
                Node::new("x", 2),
                Node::new("hub", 3),
                Node::new("y", 1),
                Node::new("z", 1),
                Node::new("w", 0),
            ],
            vec![
                Edge::new("hub", "x", 10.0),
                Edge::new("x", "y", 10.0),
                Edge::new("z", "hub", 10.0),
            ],
        );
        let adj = Adjacency::build(&g);
        let opts = RadialOptions::default();
        let r = layout(&g, &adj, &opts).expect("layout");

        assert_eq!(r.get("hub"), Some(&Point::ORIGIN));
        let depth = |id: &str| depth_of(r.get(id).expect("id").norm(), opts.ring_spacing);
        assert!((depth("x") - 1.0).abs() < 1e-9);
        assert!((depth("z") - 1.0).abs() < 1e-9);
        assert!((depth("y") - 2.0).abs() < 1e-9);
        assert!((depth("w") - 3.0).abs() < 1e-9);

        // x is visited before z, so it takes angle 0 on ring 1.
        let x = r.get("x").expect("x");
        assert!((x.x - 120.0).abs() < 1e-9 && x.y.abs() < 1e-9);
        let z = r.get("z").expect("z");
        assert!((z.x + 120.0).abs() < 1e-9 && z.y.abs() < 1e-9);
    }

    #[test]
    fn edgeless_graph_puts_everyone_but_the_center_on_ring_one() {
        let g = Graph::new(
            vec![Node::new("a", 0), Node::new("b", 0), Node::new("c", 0)],
            Vec::new(),
        );
        let adj = Adjacency::build(&g);
        let r = layout(&g, &adj, &RadialOptions::default()).expect("layout");

        assert_eq!(r.get("a"), Some(&Point::ORIGIN));
        assert!((r.get("b").expect("b").norm() - 120.0).abs() < 1e-9);
        assert!((r.get("c").expect("c").norm() - 120.0).abs() < 1e-9);
    }
}
