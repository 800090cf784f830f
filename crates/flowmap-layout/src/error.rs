#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {algorithm} option `{option}`: {value}")]
    InvalidOption {
        algorithm: &'static str,
        option: &'static str,
        value: String,
    },

    #[error("adjacency was built for {adjacency_nodes} nodes but the graph has {graph_nodes}")]
    AdjacencyMismatch {
        graph_nodes: usize,
        adjacency_nodes: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(
        algorithm: &'static str,
        option: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::InvalidOption {
            algorithm,
            option,
            value: value.to_string(),
        }
    }
}
