use crate::algo::ForceAtlas2Options;
use crate::graph::{Graph, WeightedEdge};
use crate::rng::XorShift64Star;
use nalgebra::Vector2;

pub(crate) type Vec2 = Vector2<f64>;

/// Floor for pair and gravity distances.
pub(crate) const MIN_DISTANCE: f64 = 0.01;
/// Floor for pair distances once both visual radii have been subtracted.
pub(crate) const MIN_OVERLAP_DISTANCE: f64 = 0.1;
/// Floor for the net force magnitude when deriving a node's step multiplier.
pub(crate) const MIN_FORCE: f64 = 0.01;
/// The global speed may grow by at most this fraction of itself per iteration.
pub(crate) const MAX_SPEED_RISE: f64 = 0.5;

/// Per-run simulation buffers, indexed by node position in the input list.
///
/// Buffers are allocated once; the per-iteration passes only read and write in place.
#[derive(Debug, Clone)]
pub(crate) struct SimulationState {
    pub(crate) positions: Vec<Vec2>,
    pub(crate) forces: Vec<Vec2>,
    /// Force applied on the previous iteration (zero before the first one).
    pub(crate) previous: Vec<Vec2>,
    /// `degree + 1`.
    pub(crate) masses: Vec<f64>,
    /// `sqrt(degree) * node_size_factor`.
    pub(crate) radii: Vec<f64>,
    /// Global speed of the last step, `None` before the first one.
    pub(crate) global_speed: Option<f64>,
}

impl SimulationState {
    /// Spreads nodes around the origin: node `i` sits near angle `i / n * 2π` at a random radius
    /// inside the configured band, plus a small random jitter on both axes.
    pub(crate) fn seeded(graph: &Graph, opts: &ForceAtlas2Options) -> Self {
        let n = graph.node_count();
        let mut rng = XorShift64Star::new(opts.random_seed);

        let mut positions: Vec<Vec2> = Vec::with_capacity(n);
        let mut masses: Vec<f64> = Vec::with_capacity(n);
        let mut radii: Vec<f64> = Vec::with_capacity(n);
        for (i, node) in graph.nodes().iter().enumerate() {
            let angle = (i as f64 / n as f64) * std::f64::consts::TAU;
            let radius = opts.init_radius_min + rng.next_f64_unit() * opts.init_radius_band;
            let jx = rng.next_f64_centered() * opts.init_jitter;
            let jy = rng.next_f64_centered() * opts.init_jitter;
            positions.push(Vec2::new(
                angle.cos() * radius + jx,
                angle.sin() * radius + jy,
            ));

            let degree = f64::from(node.degree);
            masses.push(degree + 1.0);
            radii.push(degree.sqrt() * opts.node_size_factor);
        }

        Self {
            forces: vec![Vec2::zeros(); n],
            previous: vec![Vec2::zeros(); n],
            positions,
            masses,
            radii,
            global_speed: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn clear_forces(&mut self) {
        self.forces.fill(Vec2::zeros());
    }

    /// All-pairs repulsion `scaling_ratio * massA * massB / d`.
    pub(crate) fn apply_repulsion(&mut self, opts: &ForceAtlas2Options) {
        let n = self.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.positions[i] - self.positions[j];
                let raw = delta.norm();
                // Coincident points have no direction; push them apart along +x.
                let dir = if raw > 0.0 {
                    delta / raw
                } else {
                    Vec2::new(1.0, 0.0)
                };

                let mut dist = raw.max(MIN_DISTANCE);
                if opts.prevent_overlap {
                    dist = (dist - self.radii[i] - self.radii[j]).max(MIN_OVERLAP_DISTANCE);
                }

                let magnitude = opts.scaling_ratio * self.masses[i] * self.masses[j] / dist;
                let f = dir * magnitude;
                self.forces[i] += f;
                self.forces[j] -= f;
            }
        }
    }

    /// Edge attraction, `w * ln(1 + d)` in LinLog mode and `w * d` otherwise.
    pub(crate) fn apply_attraction(&mut self, edges: &[WeightedEdge], opts: &ForceAtlas2Options) {
        for e in edges {
            if e.a == e.b {
                continue;
            }
            let delta = self.positions[e.a] - self.positions[e.b];
            let dist = delta.norm().max(MIN_DISTANCE);

            let w = e.weight.powf(opts.edge_weight_influence);
            let attraction = if opts.lin_log_mode {
                w * dist.ln_1p()
            } else {
                w * dist
            };

            let f = delta * (attraction / dist);
            self.forces[e.a] -= f;
            self.forces[e.b] += f;
        }
    }

    /// Pull of `gravity * mass` toward the origin.
    pub(crate) fn apply_gravity(&mut self, opts: &ForceAtlas2Options) {
        for i in 0..self.len() {
            let p = self.positions[i];
            let dist = p.norm().max(MIN_DISTANCE);
            self.forces[i] -= p * (opts.gravity * self.masses[i] / dist);
        }
    }

    /// Moves every node along its net force and returns the global speed used for the step.
    ///
    /// Swing (`|f - f_prev|`) and traction (`|f + f_prev| / 2`) are mass-weighted across all
    /// nodes and give the target speed `jitter_tolerance * traction / max(swing, 1)`. The speed
    /// follows the target downward at once but rises by at most [`MAX_SPEED_RISE`] per step,
    /// so a near-zero swing cannot launch the whole graph. Each node then moves by
    /// `f * min(global_speed / |f|, speed_cap)`.
    pub(crate) fn step(&mut self, opts: &ForceAtlas2Options) -> f64 {
        let mut global_swing = 0.0f64;
        let mut global_traction = 0.0f64;
        for i in 0..self.len() {
            let f = self.forces[i];
            let prev = self.previous[i];
            global_swing += self.masses[i] * (f - prev).norm();
            global_traction += self.masses[i] * (f + prev).norm() / 2.0;
        }

        let target = opts.jitter_tolerance * global_traction / global_swing.max(1.0);
        let global_speed = match self.global_speed {
            Some(speed) => speed + (target - speed).min(MAX_SPEED_RISE * speed),
            None => target,
        };
        self.global_speed = Some(global_speed);

        for i in 0..self.len() {
            let f = self.forces[i];
            let magnitude = f.norm().max(MIN_FORCE);
            let node_speed = (global_speed / magnitude).min(opts.speed_cap);
            self.positions[i] += f * node_speed;
            self.previous[i] = f;
        }

        global_speed
    }

    /// Translates all positions so the bounding box is centered on the origin.
    pub(crate) fn center(&mut self) {
        if self.positions.is_empty() {
            return;
        }
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.positions {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let center = Vec2::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        for p in &mut self.positions {
            *p -= center;
        }
    }
}
