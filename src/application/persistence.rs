use crate::ports::RecordStore;

use super::errors::{LocadoraError, Result};

pub(crate) fn io_error(
    store: &dyn RecordStore,
    source: Box<dyn std::error::Error + Send + Sync>,
) -> LocadoraError {
    LocadoraError::Io {
        file: store.location(),
        source,
    }
}

/// Visits every stored line with its 1-based line number.
pub(crate) fn for_each_line(
    store: &dyn RecordStore,
    mut visit: impl FnMut(usize, &str) -> Result<()>,
) -> Result<()> {
    let lines = store.lines().map_err(|err| io_error(store, err))?;
    for (index, line) in lines.enumerate() {
        let line = line.map_err(|err| io_error(store, err))?;
        visit(index + 1, &line)?;
    }
    Ok(())
}

/// Rewrites the whole store from `lines`.
pub(crate) fn replace_all(store: &dyn RecordStore, lines: Vec<String>) -> Result<()> {
    store
        .replace_all(&lines)
        .map_err(|err| io_error(store, err))
}
