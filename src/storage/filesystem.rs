//! File system storage backend
//!
//! Implements StorageBackend for a directory on the native file system.
//! A bundle is backed by one of these.
//!
//! ## Security
//!
//! All path operations are validated to prevent path traversal attacks.
//! Paths containing ".." are rejected, and all resolved paths are verified
//! to remain within the base directory.
//!
//! Only paths that exist are canonicalized. Canonicalization follows
//! symlinks, so it is what catches a link inside the bundle pointing
//! outside of it. A missing candidate has nothing to follow and
//! `canonicalize` would fail on it, so it is returned joined but
//! unresolved, and the read that follows reports `FileNotFound`.

use super::{StorageBackend, StorageError};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// File system storage backend
#[derive(Debug, Clone)]
pub struct FileSystemStorageBackend {
    base_path: PathBuf,
}

impl FileSystemStorageBackend {
    /// Create a new file system storage backend
    ///
    /// # Arguments
    ///
    /// * `base_path` - Base directory path for all file operations
    ///
    /// # Example
    ///
    /// ```rust
    /// use restkit_config::storage::FileSystemStorageBackend;
    ///
    /// let backend = FileSystemStorageBackend::new("/opt/app/resources");
    /// assert!(backend.base_path().ends_with("resources"));
    /// ```
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Base directory of this backend
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a path relative to the base path with security checks.
    ///
    /// - Rejects paths containing ".." components
    /// - Verifies an existing resolved path stays within base_path
    fn resolve_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let normalized = path.trim_start_matches('/');

        if normalized.contains("..") {
            return Err(StorageError::PermissionDenied(
                "Path traversal (..) not allowed".to_string(),
            ));
        }

        let full = self.base_path.join(normalized);

        for component in full.components() {
            if matches!(component, Component::ParentDir) {
                return Err(StorageError::PermissionDenied(
                    "Path traversal not allowed".to_string(),
                ));
            }
        }

        if full.exists() {
            let canonical = full
                .canonicalize()
                .map_err(|e| StorageError::IoError(format!("Failed to resolve path: {}", e)))?;

            let base_canonical = self
                .base_path
                .canonicalize()
                .unwrap_or_else(|_| self.base_path.clone());

            if !canonical.starts_with(&base_canonical) {
                return Err(StorageError::PermissionDenied(
                    "Path escapes base directory".to_string(),
                ));
            }

            return Ok(canonical);
        }

        Ok(full)
    }
}

impl StorageBackend for FileSystemStorageBackend {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.resolve_path(path)?;
        debug!("Reading {}", full_path.display());

        fs::read(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::FileNotFound(path.to_string())
            } else {
                StorageError::IoError(format!("Failed to read file {}: {}", path, e))
            }
        })
    }

    fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        let full_path = self.resolve_path(path)?;

        match fs::metadata(&full_path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Ok(false)
                } else {
                    Err(StorageError::IoError(format!(
                        "Failed to check file existence {}: {}",
                        path, e
                    )))
                }
            }
        }
    }

    fn location(&self, path: &str) -> String {
        self.base_path
            .join(path.trim_start_matches('/'))
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_traversal_blocked() {
        let temp = TempDir::new().unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());

        let result = backend.resolve_path("../etc/passwd");
        assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

        let result = backend.resolve_path("/foo/../../../etc/passwd");
        assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

        let result = backend.resolve_path("valid/path/file.plist");
        assert!(result.is_ok());
    }

    #[test]
    fn test_read_existing_and_missing_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Descriptors.plist"), b"<plist/>").unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());

        assert!(backend.file_exists("Descriptors.plist").unwrap());
        assert!(!backend.file_exists("Other.plist").unwrap());
        assert_eq!(backend.read_file("Descriptors.plist").unwrap(), b"<plist/>");
        assert!(matches!(
            backend.read_file("Other.plist"),
            Err(StorageError::FileNotFound(name)) if name == "Other.plist"
        ));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("nested")).unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());

        assert!(!backend.file_exists("nested").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_out_of_bundle_rejected() {
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.plist"), b"<plist/>").unwrap();

        let bundle = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret.plist"),
            bundle.path().join("Descriptors.plist"),
        )
        .unwrap();
        let backend = FileSystemStorageBackend::new(bundle.path());

        assert!(matches!(
            backend.read_file("Descriptors.plist"),
            Err(StorageError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_location_joins_base_path() {
        let backend = FileSystemStorageBackend::new("/res");
        assert_eq!(backend.location("/a.plist"), "/res/a.plist");
    }
}
