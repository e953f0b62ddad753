//! Object mapping definitions attached to response descriptors

use serde::{Deserialize, Serialize};

/// One source key path to destination attribute correspondence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    pub source_key_path: String,
    pub destination_attribute: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl MappingRule {
    pub fn new(source_key_path: impl Into<String>, destination_attribute: impl Into<String>) -> Self {
        Self {
            source_key_path: source_key_path.into(),
            destination_attribute: destination_attribute.into(),
            transform: None,
        }
    }

    /// Attach a value transform identifier
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }
}

/// The mapping of a descriptor: either rules given inline or the name of a
/// reusable mapping definition that the consumer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mapping {
    Inline(Vec<MappingRule>),
    NamedReference(String),
}

impl Mapping {
    /// Inline rules, `None` for a named reference
    pub fn rules(&self) -> Option<&[MappingRule]> {
        match self {
            Mapping::Inline(rules) => Some(rules),
            Mapping::NamedReference(_) => None,
        }
    }

    /// Referenced definition name, `None` for inline rules
    pub fn reference(&self) -> Option<&str> {
        match self {
            Mapping::Inline(_) => None,
            Mapping::NamedReference(name) => Some(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Mapping::Inline(rules) => rules.is_empty(),
            Mapping::NamedReference(name) => name.is_empty(),
        }
    }
}
