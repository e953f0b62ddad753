//! REST response descriptor configuration
//!
//! Builds validated response descriptors (rules mapping response bodies onto
//! model objects, keyed by URL path pattern and status code class) from a
//! property list or equivalent configuration resource.
//!
//! Provides:
//! - Storage backends the configuration is read from
//! - Resource resolution (default name, named, named in a bundle, file path)
//! - The descriptor builder turning a nested key/value tree into descriptors
//! - The property list factory composing the two

pub mod builder;
pub mod factory;
pub mod models;
pub mod resource;
pub mod storage;

// Re-export commonly used types
pub use builder::{DescriptorBuilder, SchemaError, build_descriptors};
pub use factory::{FactoryError, PlistDescriptorFactory};
pub use models::{
    DescriptorCollection, Mapping, MappingRule, MethodFilter, PathPattern, RequestMethod,
    ResponseDescriptor, StatusClass, StatusCodes,
};
pub use resource::{Bundle, ConfigLoader, LoadError, LoaderConfig, ResourceFormat, ResourceRef};
pub use storage::{FileSystemStorageBackend, MemoryStorageBackend, StorageBackend, StorageError};
