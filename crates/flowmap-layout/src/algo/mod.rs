pub mod circular;
pub mod forceatlas2;
pub mod radial;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// ForceAtlas2-style force simulation (LinLog attraction, adaptive speed).
    ForceAtlas2(ForceAtlas2Options),
    /// Nodes evenly spaced on one circle, in input order.
    Circular(CircularOptions),
    /// BFS rings around the highest-degree node.
    Radial(RadialOptions),
}

impl Algorithm {
    pub fn kind(&self) -> LayoutKind {
        match self {
            Algorithm::ForceAtlas2(_) => LayoutKind::ForceAtlas2,
            Algorithm::Circular(_) => LayoutKind::Circular,
            Algorithm::Radial(_) => LayoutKind::Radial,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Algorithm::ForceAtlas2(opts) => opts.validate(),
            Algorithm::Circular(opts) => opts.validate(),
            Algorithm::Radial(opts) => opts.validate(),
        }
    }
}

/// Stable strategy names, shared by artifact file names, config keys and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    ForceAtlas2,
    Circular,
    Radial,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 3] = [
        LayoutKind::ForceAtlas2,
        LayoutKind::Circular,
        LayoutKind::Radial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::ForceAtlas2 => "forceatlas2",
            LayoutKind::Circular => "circular",
            LayoutKind::Radial => "radial",
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayoutKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forceatlas2" | "fa2" => Ok(Self::ForceAtlas2),
            "circular" => Ok(Self::Circular),
            "radial" => Ok(Self::Radial),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceAtlas2Options {
    /// Fixed iteration budget; there is no convergence check.
    pub iterations: usize,
    /// Seed for the initial placement. Identical seeds reproduce identical layouts.
    pub random_seed: u64,
    pub gravity: f64,
    pub scaling_ratio: f64,
    /// `weight * ln(1 + d)` attraction when set, `weight * d` otherwise.
    pub lin_log_mode: bool,
    /// Shrinks pair distances by both nodes' visual radius before computing repulsion.
    pub prevent_overlap: bool,
    /// Exponent applied to edge weights before attraction.
    pub edge_weight_influence: f64,
    pub jitter_tolerance: f64,
    /// Upper bound on the per-node step multiplier.
    pub speed_cap: f64,
    /// Visual radius proxy is `sqrt(degree) * node_size_factor`.
    pub node_size_factor: f64,
    pub init_radius_min: f64,
    pub init_radius_band: f64,
    pub init_jitter: f64,
    /// Emit a progress event every N iterations (0 disables).
    pub progress_interval: usize,
}

impl Default for ForceAtlas2Options {
    fn default() -> Self {
        Self {
            iterations: 600,
            random_seed: 0,
            gravity: 1.0,
            scaling_ratio: 10.0,
            lin_log_mode: true,
            prevent_overlap: true,
            edge_weight_influence: 1.0,
            jitter_tolerance: 1.0,
            speed_cap: 10.0,
            node_size_factor: 5.0,
            init_radius_min: 100.0,
            init_radius_band: 200.0,
            init_jitter: 20.0,
            progress_interval: 100,
        }
    }
}

impl ForceAtlas2Options {
    const NAME: &'static str = "forceatlas2";

    pub fn validate(&self) -> Result<()> {
        non_negative(Self::NAME, "gravity", self.gravity)?;
        non_negative(Self::NAME, "scalingRatio", self.scaling_ratio)?;
        non_negative(Self::NAME, "edgeWeightInfluence", self.edge_weight_influence)?;
        non_negative(Self::NAME, "jitterTolerance", self.jitter_tolerance)?;
        non_negative(Self::NAME, "nodeSizeFactor", self.node_size_factor)?;
        non_negative(Self::NAME, "initRadiusMin", self.init_radius_min)?;
        non_negative(Self::NAME, "initRadiusBand", self.init_radius_band)?;
        non_negative(Self::NAME, "initJitter", self.init_jitter)?;
        positive(Self::NAME, "speedCap", self.speed_cap)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircularOptions {
    /// Circle radius is `node_count * radius_per_node`.
    pub radius_per_node: f64,
}

impl Default for CircularOptions {
    fn default() -> Self {
        Self {
            radius_per_node: 8.0,
        }
    }
}

impl CircularOptions {
    pub fn validate(&self) -> Result<()> {
        positive("circular", "radiusPerNode", self.radius_per_node)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadialOptions {
    /// Ring `k` sits at radius `k * ring_spacing`.
    pub ring_spacing: f64,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self {
            ring_spacing: 120.0,
        }
    }
}

impl RadialOptions {
    pub fn validate(&self) -> Result<()> {
        positive("radial", "ringSpacing", self.ring_spacing)
    }
}

fn non_negative(algorithm: &'static str, option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(algorithm, option, value))
    }
}

fn positive(algorithm: &'static str, option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(algorithm, option, value))
    }
}
