//! Error types for configuration resource loading

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while resolving and parsing a configuration resource
#[derive(Error, Debug)]
pub enum LoadError {
    /// The resource reference could not be resolved to an existing resource
    #[error("Resource not found: {reference} (tried: {})", .tried.join(", "))]
    ResourceNotFound {
        reference: String,
        tried: Vec<String>,
    },

    /// The resource exists but is not a nested key/value structure
    #[error("Malformed resource {path}: {message}")]
    MalformedResource { path: String, message: String },

    /// Storage failure other than a missing file
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LoadError {
    pub fn not_found(reference: impl Into<String>, tried: Vec<String>) -> Self {
        Self::ResourceNotFound {
            reference: reference.into(),
            tried,
        }
    }

    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResource {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for resource loading
pub type LoadResult<T> = Result<T, LoadError>;
