//! Small file-write helpers with unified error handling

use std::fs;
use std::path::Path;

use crate::error::{BotstrapError, Result};

/// Write `content` to `path`, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BotstrapError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    fs::write(path, content).map_err(|e| BotstrapError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Write `content` to `path` only when the file does not exist yet.
/// Returns true when the file was written. Operator-edited files are
/// never overwritten through this path.
pub fn write_if_absent(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_file(path, content)?;
    Ok(true)
}
