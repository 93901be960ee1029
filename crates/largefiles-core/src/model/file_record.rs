/// A discovered oversized file.
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One file whose size exceeded the scan threshold and that no ignore
/// pattern excluded. Immutable once created by the walker.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FileRecord {
    /// Path as produced by the walker (relative if the root was relative).
    path: PathBuf,
    /// Logical file size in bytes.
    size_bytes: u64,
}

impl FileRecord {
    pub fn new(path: PathBuf, size_bytes: u64) -> Self {
        Self { path, size_bytes }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}
