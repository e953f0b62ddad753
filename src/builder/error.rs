//! Error types for descriptor construction

use thiserror::Error;

/// The configuration tree violates the descriptor-entry schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Root is neither a sequence nor a single mapping
    #[error("root must be list or object")]
    InvalidRoot,

    /// An entry of the root sequence is not a mapping
    #[error("entry {entry}: invalid entry, expected an object")]
    InvalidEntry { entry: usize },

    /// A required field is absent
    #[error("entry {entry}: missing {field}")]
    MissingField { entry: usize, field: &'static str },

    /// A field has an unsupported type or value
    #[error("entry {entry}: invalid {field}: {detail}")]
    InvalidField {
        entry: usize,
        field: &'static str,
        detail: String,
    },

    /// An inline mapping rule lacks a required field or has a wrongly typed one
    #[error("entry {entry}: invalid mapping entry at rule {rule} ({field})")]
    InvalidMappingRule {
        entry: usize,
        rule: usize,
        field: &'static str,
    },
}

impl SchemaError {
    pub fn invalid(entry: usize, field: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidField {
            entry,
            field,
            detail: detail.into(),
        }
    }

    /// Index of the failing entry, `None` when the root itself is invalid
    pub fn entry(&self) -> Option<usize> {
        match self {
            SchemaError::InvalidRoot => None,
            SchemaError::InvalidEntry { entry }
            | SchemaError::MissingField { entry, .. }
            | SchemaError::InvalidField { entry, .. }
            | SchemaError::InvalidMappingRule { entry, .. } => Some(*entry),
        }
    }

    /// Name of the failing field, when a single field is at fault
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SchemaError::InvalidRoot | SchemaError::InvalidEntry { .. } => None,
            SchemaError::MissingField { field, .. }
            | SchemaError::InvalidField { field, .. }
            | SchemaError::InvalidMappingRule { field, .. } => Some(*field),
        }
    }

    /// Short classification of the failure, e.g. `invalid statusCodes`
    pub fn message(&self) -> String {
        match self {
            SchemaError::InvalidRoot => "root must be list or object".to_string(),
            SchemaError::InvalidEntry { .. } => "invalid entry".to_string(),
            SchemaError::MissingField { field, .. } => format!("missing {}", field),
            SchemaError::InvalidField { field, .. } => format!("invalid {}", field),
            SchemaError::InvalidMappingRule { .. } => "invalid mapping entry".to_string(),
        }
    }
}

/// Result type for descriptor construction
pub type SchemaResult<T> = Result<T, SchemaError>;
