//! In-memory storage backend
//!
//! Holds resources as named byte buffers. Useful for configuration that is
//! compiled into the binary with `include_bytes!` and for tests.

use super::{StorageBackend, StorageError};
use std::collections::BTreeMap;

/// In-memory storage backend keyed by resource file name
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageBackend {
    label: String,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryStorageBackend {
    /// Create an empty backend. `label` only appears in diagnostics.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            files: BTreeMap::new(),
        }
    }

    /// Add a file, replacing any previous content under the same name
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add a file in place
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        let path = path.into();
        self.files
            .insert(path.trim_start_matches('/').to_string(), content.into());
    }
}

impl StorageBackend for MemoryStorageBackend {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.files
            .get(path.trim_start_matches('/'))
            .cloned()
            .ok_or_else(|| StorageError::FileNotFound(path.to_string()))
    }

    fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.files.contains_key(path.trim_start_matches('/')))
    }

    fn location(&self, path: &str) -> String {
        format!("memory://{}/{}", self.label, path.trim_start_matches('/'))
    }
}
