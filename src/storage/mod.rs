//! Storage backend abstraction
//!
//! Defines the StorageBackend trait and implementations for the places a
//! configuration resource can live:
//! - FileSystemStorageBackend: a directory on the native file system (bundles)
//! - MemoryStorageBackend: resources held in memory (embedded or generated)

pub mod filesystem;
pub mod memory;

pub use filesystem::FileSystemStorageBackend;
pub use memory::MemoryStorageBackend;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Trait for storage backends
///
/// Resource lookups only ever read, so the trait is limited to read access.
/// Paths are relative to the root of the backend.
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Read a file from storage
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Check if a file exists
    fn file_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Human readable location of `path` inside this backend, used for
    /// diagnostics and for reporting where a resource was loaded from.
    fn location(&self, path: &str) -> String;
}
