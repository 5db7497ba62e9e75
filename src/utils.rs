use crate::error::Error;
use crate::result::Result;
use std::fs;
use std::path::Path;

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Derive a filesystem-safe base name for a source path, with any path
/// separators replaced by an underscore.
pub fn safe_base_name(path: &Path) -> Result<String> {
    let name = path.file_name().ok_or_else(|| {
        Error::custom(format!("Cannot derive archive name from {}", path.display()))
    })?;
    Ok(name
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "_"))
}
