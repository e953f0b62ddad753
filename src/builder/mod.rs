//! Descriptor builder
//!
//! Turns a nested key/value configuration tree into an ordered
//! [`DescriptorCollection`]. Building is a pure function of its input:
//! no file or network access, no deduplication, and declaration order is
//! preserved. The first invalid entry fails the whole build.
//!
//! # Example
//!
//! ```rust
//! use restkit_config::builder::build_descriptors;
//! use restkit_config::models::{PathPattern, StatusClass, StatusCodes};
//! use serde_json::json;
//!
//! let config = json!([{
//!     "pathPattern": "/users/:id",
//!     "statusCodes": "2xx",
//!     "mapping": [{"sourceKeyPath": "name", "destinationAttribute": "fullName"}]
//! }]);
//!
//! let descriptors = build_descriptors(&config).unwrap();
//! let user = descriptors.get(0).unwrap();
//! assert_eq!(user.path_pattern, PathPattern::new("/users/:id"));
//! assert_eq!(user.status_codes, StatusCodes::Class(StatusClass::Successful));
//! assert_eq!(user.key_path, None);
//! ```

mod error;
mod fields;

pub use error::{SchemaError, SchemaResult};

use crate::models::{DescriptorCollection, ResponseDescriptor};
use serde_json::Value;
use tracing::debug;

/// Builds response descriptors from configuration trees
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorBuilder;

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Validate `raw` and build the descriptor collection it describes
    pub fn build(&self, raw: &Value) -> SchemaResult<DescriptorCollection> {
        let entries = normalize_root(raw)?;

        let descriptors = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.build_entry(index, entry))
            .collect::<SchemaResult<Vec<_>>>()?;

        debug!("Built {} response descriptors", descriptors.len());
        Ok(DescriptorCollection::new(descriptors))
    }

    fn build_entry(&self, index: usize, entry: &Value) -> SchemaResult<ResponseDescriptor> {
        let object = entry
            .as_object()
            .ok_or(SchemaError::InvalidEntry { entry: index })?;

        for key in object.keys() {
            if !fields::ENTRY_FIELDS.contains(&key.as_str()) {
                debug!("Ignoring unknown field '{}' in entry {}", key, index);
            }
        }

        Ok(ResponseDescriptor {
            key_path: fields::key_path(index, object)?,
            path_pattern: fields::path_pattern(index, object)?,
            status_codes: fields::status_codes(index, object)?,
            method: fields::method(index, object)?,
            object_class: fields::object_class(index, object)?,
            mapping: fields::mapping(index, object)?,
        })
    }
}

/// Build with the default builder
pub fn build_descriptors(raw: &Value) -> SchemaResult<DescriptorCollection> {
    DescriptorBuilder::new().build(raw)
}

/// A single mapping is accepted in place of a one-element sequence
fn normalize_root(raw: &Value) -> SchemaResult<&[Value]> {
    match raw {
        Value::Array(entries) => Ok(entries),
        Value::Object(_) => Ok(std::slice::from_ref(raw)),
        _ => Err(SchemaError::InvalidRoot),
    }
}
