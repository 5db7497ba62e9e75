use crate::error::Error;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve raw source paths to canonical absolute paths, order preserved.
///
/// Fail-fast: the first path that does not exist fails the whole batch
/// with an error naming it. This is deliberately stricter than archive
/// creation, where failures are isolated per source.
pub fn resolve_all(raw_sources: &[String]) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::with_capacity(raw_sources.len());

    for item in raw_sources {
        let path = Path::new(item);
        if !path.exists() {
            return Err(Error::MissingSource(item.clone()));
        }
        resolved.push(fs::canonicalize(path)?);
    }

    Ok(resolved)
}
