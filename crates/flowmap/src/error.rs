use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph document {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("graph document {} has no `{name}` collection", path.display())]
    MissingCollection { path: PathBuf, name: &'static str },

    #[error("invalid settings file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {kind} layout: {source}")]
    Serialize {
        kind: flowmap_layout::LayoutKind,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Layout(#[from] flowmap_layout::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
