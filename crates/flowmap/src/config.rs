use std::path::{Path, PathBuf};

use flowmap_layout::{Algorithm, CircularOptions, ForceAtlas2Options, LayoutKind, RadialOptions};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_INPUT: &str = "src/data/graph.json";
pub const DEFAULT_OUT_DIR: &str = "src/data/layouts";

/// Batch settings. Every field has a default, so an empty settings file (or none) reproduces the
/// conventional paths and all three strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// Strategies to compute, in order. Duplicates are ignored.
    pub strategies: Vec<LayoutKind>,
    /// Compute strategies concurrently. Output is identical either way.
    pub parallel: bool,
    pub forceatlas2: ForceAtlas2Options,
    pub circular: CircularOptions,
    pub radial: RadialOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            strategies: LayoutKind::ALL.to_vec(),
            parallel: true,
            forceatlas2: ForceAtlas2Options::default(),
            circular: CircularOptions::default(),
            radial: RadialOptions::default(),
        }
    }
}

impl Settings {
    /// Reads a JSON settings file; missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Selected strategies without repeats, in first-mention order.
    pub fn selected(&self) -> Vec<LayoutKind> {
        let mut out: Vec<LayoutKind> = Vec::with_capacity(self.strategies.len());
        for &kind in &self.strategies {
            if !out.contains(&kind) {
                out.push(kind);
            }
        }
        out
    }

    pub fn algorithm(&self, kind: LayoutKind) -> Algorithm {
        match kind {
            LayoutKind::ForceAtlas2 => Algorithm::ForceAtlas2(self.forceatlas2.clone()),
            LayoutKind::Circular => Algorithm::Circular(self.circular.clone()),
            LayoutKind::Radial => Algorithm::Radial(self.radial.clone()),
        }
    }

    /// Validates the options of every selected strategy.
    pub fn validate(&self) -> Result<()> {
        for kind in self.selected() {
            self.algorithm(kind).validate()?;
        }
        Ok(())
    }
}
