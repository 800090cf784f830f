//! Reader for the graph document produced by the ingestion step.
//!
//! Only the fields needed for layout are read; anything else in the document (metadata, labels,
//! per-edge transaction lists) is ignored.

use std::io::BufReader;
use std::path::Path;

use flowmap_layout::{Edge, Graph, Node};
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Option<Vec<NodeRecord>>,
    /// Raw records, read one by one.
    #[serde(default)]
    pub edges: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub degree: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default, rename = "totalAmount")]
    pub total_amount: Option<Amount>,
}

/// `totalAmount` as exported: usually a number, sometimes a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Amount {
    /// Numeric value, or `None` when the field carries no usable number.
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(v) => Some(*v),
            Amount::Text(s) => s.trim().parse().ok(),
            Amount::Other(_) => None,
        }
    }
}

impl EdgeRecord {
    /// Amount used for weighting; absent or unusable amounts count as `1`.
    pub fn amount(&self) -> f64 {
        self.total_amount
            .as_ref()
            .and_then(Amount::value)
            .unwrap_or(1.0)
    }
}

/// A loaded graph plus the edge records that had to be dropped while reading it.
#[derive(Debug, Clone, Default)]
pub struct LoadedGraph {
    pub graph: Graph,
    /// Edge records without a string `source` and `target`.
    pub malformed_edges: usize,
}

impl GraphDocument {
    /// Converts the document into a layout graph. Both collections must be present; an empty
    /// collection is fine. Edge records that cannot be read are skipped and counted.
    pub fn into_graph(self, path: &Path) -> Result<LoadedGraph> {
        let nodes = self.nodes.ok_or_else(|| Error::MissingCollection {
            path: path.to_path_buf(),
            name: "nodes",
        })?;
        let records = self.edges.ok_or_else(|| Error::MissingCollection {
            path: path.to_path_buf(),
            name: "edges",
        })?;

        let nodes = nodes
            .into_iter()
            .map(|n| Node::new(n.id, n.degree))
            .collect();

        let mut edges = Vec::with_capacity(records.len());
        let mut malformed_edges = 0usize;
        for (index, value) in records.into_iter().enumerate() {
            match serde_json::from_value::<EdgeRecord>(value) {
                Ok(e) => {
                    let amount = e.amount();
                    edges.push(Edge::new(e.source, e.target, amount));
                }
                Err(err) => {
                    tracing::debug!(index, %err, "skipping malformed edge record");
                    malformed_edges += 1;
                }
            }
        }
        if malformed_edges > 0 {
            tracing::warn!(
                path = %path.display(),
                count = malformed_edges,
                "skipped malformed edge records"
            );
        }

        Ok(LoadedGraph {
            graph: Graph::new(nodes, edges),
            malformed_edges,
        })
    }
}

/// Parses a graph document from JSON text. `path` is only used for error context.
pub fn parse_graph(text: &str, path: &Path) -> Result<LoadedGraph> {
    let doc: GraphDocument = serde_json::from_str(text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    doc.into_graph(path)
}

/// Reads and parses the graph document at `path`.
pub fn load_graph(path: impl AsRef<Path>) -> Result<LoadedGraph> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let doc: GraphDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let loaded = doc.into_graph(path)?;
    tracing::info!(
        path = %path.display(),
        nodes = loaded.graph.node_count(),
        edges = loaded.graph.edge_count(),
        "loaded graph document"
    );
    Ok(loaded)
}
