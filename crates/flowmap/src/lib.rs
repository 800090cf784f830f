#![forbid(unsafe_code)]

//! Offline precomputation of the static layouts served with the money-flow dashboard.
//!
//! [`run`] reads the graph document, computes the selected strategies from
//! [`flowmap_layout`] and writes one JSON artifact per strategy. The artifacts are read by the
//! client at startup; nothing here runs at request time.

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
mod pipeline;

pub use cache::{artifact_path, read_layout, resolve_positions, write_layout};
pub use config::{DEFAULT_INPUT, DEFAULT_OUT_DIR, Settings};
pub use document::{LoadedGraph, load_graph, parse_graph};
pub use error::{Error, Result};
pub use pipeline::{ComputedLayout, RunSummary, StrategySummary, compute_layouts, run};

pub use flowmap_layout;
pub use flowmap_layout::LayoutKind;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
