//! Configuration resource resolution
//!
//! Resolves a [`ResourceRef`] to a nested key/value tree:
//! - the default resource in the main bundle
//! - a named resource in the main bundle
//! - a named resource in an explicit [`Bundle`]
//! - a file path

mod config;
mod error;
mod format;
mod loader;

pub use config::{DEFAULT_RESOURCE_NAME, LoaderConfig};
pub use error::{LoadError, LoadResult};
pub use format::ResourceFormat;
pub use loader::{ConfigLoader, LoadedResource};

use crate::storage::{FileSystemStorageBackend, StorageBackend, StorageError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A named scope in which resources are resolved by name
#[derive(Debug, Clone)]
pub struct Bundle {
    name: String,
    backend: Arc<dyn StorageBackend>,
}

impl Bundle {
    /// Bundle rooted at a directory
    pub fn at(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            name: path.display().to_string(),
            backend: Arc::new(FileSystemStorageBackend::new(path)),
        }
    }

    /// Bundle served by an arbitrary storage backend
    pub fn with_backend(name: impl Into<String>, backend: impl StorageBackend + 'static) -> Self {
        Self {
            name: name.into(),
            backend: Arc::new(backend),
        }
    }

    /// Bundle rooted at the directory of the running executable
    pub fn main() -> LoadResult<Self> {
        let exe = std::env::current_exe().map_err(|e| {
            StorageError::IoError(format!("Failed to locate executable: {}", e))
        })?;
        let dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::at(dir))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }
}

/// Reference to a configuration resource
#[derive(Debug, Clone)]
pub enum ResourceRef {
    /// Default resource name in the main bundle
    Default,
    /// Named resource in the main bundle
    Named(String),
    /// Named resource in the given bundle
    Scoped { name: String, bundle: Bundle },
    /// File path, absolute or relative to the working directory
    Path(PathBuf),
}

impl ResourceRef {
    pub fn named(name: impl Into<String>) -> Self {
        ResourceRef::Named(name.into())
    }

    pub fn scoped(name: impl Into<String>, bundle: Bundle) -> Self {
        ResourceRef::Scoped {
            name: name.into(),
            bundle,
        }
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        ResourceRef::Path(path.into())
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::Default => write!(f, "default resource"),
            ResourceRef::Named(name) => write!(f, "{}", name),
            ResourceRef::Scoped { name, bundle } => write!(f, "{} in bundle {}", name, bundle.name()),
            ResourceRef::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
