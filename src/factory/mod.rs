//! Property list response descriptor factory
//!
//! Composes the config loader and the descriptor builder. Each constructor
//! picks a resource resolution strategy, loads the configuration tree and
//! builds the descriptors from it. Failures of either step are returned
//! unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use restkit_config::factory::PlistDescriptorFactory;
//! use restkit_config::resource::Bundle;
//!
//! let factory = PlistDescriptorFactory::with_filename_in_bundle(
//!     "ResponseDescriptors",
//!     &Bundle::at("/opt/app/resources"),
//! )?;
//! for descriptor in factory.descriptors() {
//!     println!("{} -> {:?}", descriptor.path_pattern, descriptor.mapping);
//! }
//! ```

use crate::builder::{DescriptorBuilder, SchemaError};
use crate::models::DescriptorCollection;
use crate::resource::{Bundle, ConfigLoader, LoadError, LoaderConfig, ResourceRef};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Failure of a factory construction call
#[derive(Error, Debug)]
pub enum FactoryError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type for factory construction
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Response descriptors built from a property list resource
#[derive(Debug, Clone)]
pub struct PlistDescriptorFactory {
    source: String,
    descriptors: DescriptorCollection,
}

impl PlistDescriptorFactory {
    /// Build from the default resource in the main bundle
    pub fn new() -> FactoryResult<Self> {
        Self::with_loader(&plist_loader(), &ResourceRef::Default)
    }

    /// Build from a named resource in the main bundle
    pub fn with_filename(filename: &str) -> FactoryResult<Self> {
        Self::with_loader(&plist_loader(), &ResourceRef::named(filename))
    }

    /// Build from a named resource in `bundle`
    pub fn with_filename_in_bundle(filename: &str, bundle: &Bundle) -> FactoryResult<Self> {
        Self::with_loader(
            &plist_loader(),
            &ResourceRef::scoped(filename, bundle.clone()),
        )
    }

    /// Build from a file path
    pub fn with_filepath(filepath: impl AsRef<Path>) -> FactoryResult<Self> {
        Self::with_loader(
            &plist_loader(),
            &ResourceRef::path(filepath.as_ref()),
        )
    }

    /// Build from any resource reference using an explicitly configured loader
    pub fn with_loader(loader: &ConfigLoader, reference: &ResourceRef) -> FactoryResult<Self> {
        let resource = loader.load_resource(reference)?;
        let descriptors = DescriptorBuilder::new().build(&resource.value)?;

        info!(
            "Built {} response descriptors from {}",
            descriptors.len(),
            resource.location
        );

        Ok(Self {
            source: resource.location,
            descriptors,
        })
    }

    pub fn descriptors(&self) -> &DescriptorCollection {
        &self.descriptors
    }

    pub fn into_descriptors(self) -> DescriptorCollection {
        self.descriptors
    }

    /// Location the configuration was read from
    pub fn source(&self) -> &str {
        &self.source
    }
}

fn plist_loader() -> ConfigLoader {
    ConfigLoader::with_config(LoaderConfig::plist_only())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorageBackend;

    const PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>pathPattern</key>
    <string>/session</string>
    <key>mapping</key>
    <string>Session</string>
</dict>
</plist>"#;

    #[test]
    fn test_in_bundle() {
        let bundle = Bundle::with_backend(
            "app",
            MemoryStorageBackend::new("app").with_file("Api.plist", PLIST),
        );

        let factory = PlistDescriptorFactory::with_filename_in_bundle("Api", &bundle).unwrap();
        assert_eq!(factory.descriptors().len(), 1);
        assert_eq!(factory.source(), "memory://app/Api.plist");
        assert_eq!(factory.descriptors().named_references(), vec!["Session"]);
    }

    #[test]
    fn test_plist_only_ignores_other_formats() {
        let bundle = Bundle::with_backend(
            "app",
            MemoryStorageBackend::new("app").with_file("Api.json", r#"{"mapping": "A"}"#),
        );

        let err = PlistDescriptorFactory::with_filename_in_bundle("Api", &bundle).unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Load(LoadError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn test_schema_error_propagates_unchanged() {
        let bundle = Bundle::with_backend(
            "app",
            MemoryStorageBackend::new("app").with_file(
                "Bad.plist",
                r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><string>oops</string></plist>"#,
            ),
        );

        let err = PlistDescriptorFactory::with_filename_in_bundle("Bad", &bundle).unwrap_err();
        assert!(matches!(err, FactoryError::Schema(SchemaError::InvalidRoot)));
        assert_eq!(err.to_string(), "root must be list or object");
    }
}
