//! Layout artifacts: one pretty-printed JSON object per strategy, `{ "<id>": { "x", "y" } }`.

use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flowmap_layout::{LayoutKind, LayoutResult, Point};
use indexmap::IndexMap;

use crate::error::{Error, Result};

/// `<dir>/<kind>.json`.
pub fn artifact_path(dir: &Path, kind: LayoutKind) -> PathBuf {
    dir.join(format!("{}.json", kind.as_str()))
}

/// Writes `layout` to `<dir>/<kind>.json`, creating `dir` if needed.
///
/// The JSON is written to a temporary file in `dir` and renamed into place once flushed, so a
/// reader either sees the previous artifact or the complete new one. The temporary file is
/// removed if any step fails.
pub fn write_layout(dir: &Path, kind: LayoutKind, layout: &LayoutResult) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let path = artifact_path(dir, kind);

    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    {
        let mut w = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut w, layout)
            .map_err(|source| Error::Serialize { kind, source })?;
        w.write_all(b"\n").map_err(|e| Error::io(tmp.path(), e))?;
        w.flush().map_err(|e| Error::io(tmp.path(), e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(&path).map_err(|e| Error::io(&path, e.error))?;

    tracing::info!(
        kind = %kind,
        path = %path.display(),
        nodes = layout.len(),
        "wrote layout"
    );
    Ok(path)
}

pub fn read_layout(path: impl AsRef<Path>) -> Result<LayoutResult> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies a layout to the positions a consumer currently holds.
///
/// Every id in `current` keeps its slot; it takes the layout's position when the layout has one
/// and keeps its last known position otherwise. Ids only present in the layout are ignored.
pub fn resolve_positions(
    current: &IndexMap<String, Point>,
    layout: &LayoutResult,
) -> IndexMap<String, Point> {
    current
        .iter()
        .map(|(id, last)| (id.clone(), layout.get(id).copied().unwrap_or(*last)))
        .collect()
}
