//! Response descriptor model

use super::mapping::Mapping;
use super::method::{MethodFilter, RequestMethod};
use super::path::PathPattern;
use super::status::StatusCodes;
use serde::{Deserialize, Serialize};

/// A declarative rule correlating a path pattern and status classifier with
/// an object mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescriptor {
    /// Sub-structure of the response body to map, `None` for the whole body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
    #[serde(default)]
    pub path_pattern: PathPattern,
    #[serde(default)]
    pub status_codes: StatusCodes,
    #[serde(default)]
    pub method: MethodFilter,
    /// Destination model type name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_class: Option<String>,
    pub mapping: Mapping,
}

impl ResponseDescriptor {
    /// Descriptor matching any path, method and status
    pub fn new(mapping: Mapping) -> Self {
        Self {
            key_path: None,
            path_pattern: PathPattern::Any,
            status_codes: StatusCodes::Any,
            method: MethodFilter::Any,
            object_class: None,
            mapping,
        }
    }

    /// Whether a response to `method path` with `status` falls under this
    /// descriptor
    pub fn matches(&self, method: RequestMethod, path: &str, status: u16) -> bool {
        self.method.contains(method)
            && self.status_codes.contains(status)
            && self.path_pattern.matches(path)
    }
}

/// Ordered, immutable sequence of response descriptors
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorCollection {
    descriptors: Vec<ResponseDescriptor>,
}

impl DescriptorCollection {
    pub fn new(descriptors: Vec<ResponseDescriptor>) -> Self {
        Self { descriptors }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResponseDescriptor> {
        self.descriptors.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResponseDescriptor> {
        self.descriptors.iter()
    }

    pub fn as_slice(&self) -> &[ResponseDescriptor] {
        &self.descriptors
    }

    /// First descriptor, in declaration order, accepting the response.
    ///
    /// This is only a convenience for consumers that want first-declared-wins
    /// resolution of overlapping descriptors.
    pub fn find(&self, method: RequestMethod, path: &str, status: u16) -> Option<&ResponseDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.matches(method, path, status))
    }

    /// Distinct named mapping references in order of first appearance
    pub fn named_references(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.descriptors.iter().filter_map(|d| d.mapping.reference()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl IntoIterator for DescriptorCollection {
    type Item = ResponseDescriptor;
    type IntoIter = std::vec::IntoIter<ResponseDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}

impl<'a> IntoIterator for &'a DescriptorCollection {
    type Item = &'a ResponseDescriptor;
    type IntoIter = std::slice::Iter<'a, ResponseDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mapping::MappingRule;
    use crate::models::status::StatusClass;

    fn descriptor(pattern: &str, status: StatusCodes, reference: &str) -> ResponseDescriptor {
        ResponseDescriptor {
            path_pattern: PathPattern::new(pattern),
            status_codes: status,
            ..ResponseDescriptor::new(Mapping::NamedReference(reference.to_string()))
        }
    }

    #[test]
    fn test_find_prefers_first_declared() {
        let collection = DescriptorCollection::new(vec![
            descriptor("/users/:id", StatusCodes::Class(StatusClass::Successful), "User"),
            descriptor("/users/:id", StatusCodes::Any, "Fallback"),
            descriptor("", StatusCodes::Class(StatusClass::ClientError), "Error"),
        ]);

        let found = collection.find(RequestMethod::Get, "/users/7", 200).unwrap();
        assert_eq!(found.mapping.reference(), Some("User"));

        let found = collection.find(RequestMethod::Get, "/users/7", 404).unwrap();
        assert_eq!(found.mapping.reference(), Some("Fallback"));

        let found = collection.find(RequestMethod::Get, "/other", 422).unwrap();
        assert_eq!(found.mapping.reference(), Some("Error"));

        assert!(collection.find(RequestMethod::Get, "/other", 200).is_none());
    }

    #[test]
    fn test_named_references_are_distinct() {
        let collection = DescriptorCollection::new(vec![
            descriptor("/a", StatusCodes::Any, "User"),
            ResponseDescriptor::new(Mapping::Inline(vec![MappingRule::new("id", "identifier")])),
            descriptor("/b", StatusCodes::Any, "Error"),
            descriptor("/c", StatusCodes::Any, "User"),
        ]);

        assert_eq!(collection.named_references(), vec!["User", "Error"]);
    }

    #[test]
    fn test_method_filter_applies() {
        let mut only_post = descriptor("/users", StatusCodes::Any, "Created");
        only_post.method = MethodFilter::Only([RequestMethod::Post].into_iter().collect());
        let collection = DescriptorCollection::new(vec![only_post]);

        assert!(collection.find(RequestMethod::Post, "/users", 201).is_some());
        assert!(collection.find(RequestMethod::Get, "/users", 200).is_none());
    }

    #[test]
    fn test_serializes_as_list() {
        let collection = DescriptorCollection::new(vec![descriptor("/a", StatusCodes::Any, "A")]);
        let json = serde_json::to_value(&collection).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);
    }
}
