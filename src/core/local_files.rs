use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::io;

/// Entry returned from directory listing
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    /// File name as UTF-8, if it is valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// File system operations the fixer needs.
pub trait FileSystem {
    fn is_dir(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Direct children of `dir`, not recursive.
    fn list(&self, dir: &Path) -> Result<Vec<Entry>>;
}

/// Local filesystem implementation
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> Result<String> {
        io::read_file(path, "read")
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        io::write_file(path, content, "write")
    }

    fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        let entries = fs::read_dir(dir).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("list directory {}", dir.display())),
            )
        })?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                Error::internal_io(
                    e.to_string(),
                    Some(format!("list directory {}", dir.display())),
                )
            })?;
            let path = entry.path();
            let is_dir = path.is_dir();
            result.push(Entry { path, is_dir });
        }

        Ok(result)
    }
}

/// Convenience function to get local filesystem
pub fn local() -> LocalFs {
    LocalFs::new()
}
