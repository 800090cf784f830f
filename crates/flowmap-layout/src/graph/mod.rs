mod adjacency;

pub use adjacency::{Adjacency, Neighbor, WeightedEdge, edge_weight};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Undirected view of the money-flow graph used by every layout strategy.
///
/// The node list is authoritative: its order defines node indices, the circular ordering and
/// every first-in-input-order tie break.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    id_to_idx: FxHashMap<String, usize>,
}

impl Graph {
    /// Builds a graph, keeping the first occurrence of any repeated node id.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut id_to_idx: FxHashMap<String, usize> = FxHashMap::default();
        id_to_idx.reserve(nodes.len());

        let mut kept: Vec<Node> = Vec::with_capacity(nodes.len());
        for n in nodes {
            if id_to_idx.contains_key(n.id.as_str()) {
                tracing::warn!(id = %n.id, "dropping duplicate node id");
                continue;
            }
            id_to_idx.insert(n.id.clone(), kept.len());
            kept.push(n);
        }

        Self {
            nodes: kept,
            edges,
            id_to_idx,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_idx.get(id).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    /// Precomputed count of incident edges; doubles as the node's mass.
    pub degree: u32,
}

impl Node {
    pub fn new(id: impl Into<String>, degree: u32) -> Self {
        Self {
            id: id.into(),
            degree,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Aggregated transaction amount. Zero, negative and non-finite amounts weigh like `1`.
    pub amount: f64,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, amount: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the origin, `angle` radians counter-clockwise from +x.
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self {
            x: angle.cos() * radius,
            y: angle.sin() * radius,
        }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }

    /// Bounding box of `points`, or `None` when empty or when any coordinate is non-finite.
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return None;
        }
        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }
}

/// Node id → position for one strategy, in input node order.
///
/// Serializes as a flat JSON object: `{ "<id>": { "x": .., "y": .. }, ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutResult {
    pub positions: IndexMap<String, Point>,
}

impl LayoutResult {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: IndexMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Point> {
        self.positions.get(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Point)> {
        self.positions.iter().map(|(id, p)| (id.as_str(), p))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.positions.values())
    }
}
