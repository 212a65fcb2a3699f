use crate::core::Storage;
use crate::utils::error::{RemapError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem storage; relative paths resolve against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(Path::new(path))
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(self.resolve(path)).map_err(|source| RemapError::NotFoundError {
            path: path.to_string(),
            source,
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        // Parent directories are not created; a missing directory is a write failure.
        fs::write(self.resolve(path), data).map_err(|source| RemapError::IoError {
            path: path.to_string(),
            source,
        })
    }
}
