//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
/// Content that is not valid UTF-8 is reported the same way.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("{} {}", operation, path.display())),
        )
    })
}

/// Write content to file with standardized error handling.
///
/// Wraps `fs::write`, which truncates and overwrites the existing file in
/// place: symlinks are followed and the file's permissions are kept.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("{} {}", operation, path.display())),
        )
    })
}
