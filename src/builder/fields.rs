//! Normalization of individual descriptor-entry fields

use super::error::{SchemaError, SchemaResult};
use crate::models::{
    Mapping, MappingRule, MethodFilter, PathPattern, RequestMethod, StatusClass, StatusCodes,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub const KEY_PATH: &str = "keyPath";
pub const PATH_PATTERN: &str = "pathPattern";
pub const STATUS_CODES: &str = "statusCodes";
pub const METHOD: &str = "method";
pub const OBJECT_CLASS: &str = "objectClass";
pub const MAPPING: &str = "mapping";
pub const SOURCE_KEY_PATH: &str = "sourceKeyPath";
pub const DESTINATION_ATTRIBUTE: &str = "destinationAttribute";
pub const TRANSFORM: &str = "transform";

/// Fields understood in a descriptor entry
pub const ENTRY_FIELDS: [&str; 6] = [KEY_PATH, PATH_PATTERN, STATUS_CODES, METHOD, OBJECT_CLASS, MAPPING];

/// `null` is treated the same as an absent field
fn present<'a>(entry: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    entry.get(field).filter(|value| !value.is_null())
}

pub(crate) fn key_path(index: usize, entry: &Map<String, Value>) -> SchemaResult<Option<String>> {
    match present(entry, KEY_PATH) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::invalid(
            index,
            KEY_PATH,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

pub(crate) fn path_pattern(index: usize, entry: &Map<String, Value>) -> SchemaResult<PathPattern> {
    match present(entry, PATH_PATTERN) {
        None => Ok(PathPattern::Any),
        Some(Value::String(s)) => Ok(PathPattern::new(s.as_str())),
        Some(other) => Err(SchemaError::invalid(
            index,
            PATH_PATTERN,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

pub(crate) fn object_class(index: usize, entry: &Map<String, Value>) -> SchemaResult<Option<String>> {
    match present(entry, OBJECT_CLASS) {
        None => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
        Some(Value::String(_)) => Err(SchemaError::invalid(index, OBJECT_CLASS, "empty class name")),
        Some(other) => Err(SchemaError::invalid(
            index,
            OBJECT_CLASS,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

/// Accepts an integer, a list of integers, or a class pattern (`2xx`, `any`)
pub(crate) fn status_codes(index: usize, entry: &Map<String, Value>) -> SchemaResult<StatusCodes> {
    let value = match present(entry, STATUS_CODES) {
        None => return Ok(StatusCodes::Any),
        Some(value) => value,
    };

    match value {
        Value::String(pattern) => {
            let pattern = pattern.trim();
            if pattern.eq_ignore_ascii_case("any") {
                return Ok(StatusCodes::Any);
            }
            if let Some(class) = StatusClass::parse(pattern) {
                return Ok(StatusCodes::Class(class));
            }
            status_code(value)
                .map(|code| StatusCodes::Set(BTreeSet::from([code])))
                .ok_or_else(|| {
                    SchemaError::invalid(
                        index,
                        STATUS_CODES,
                        format!("unrecognized pattern '{}'", pattern),
                    )
                })
        }
        Value::Number(_) => status_code(value)
            .map(|code| StatusCodes::Set(BTreeSet::from([code])))
            .ok_or_else(|| {
                SchemaError::invalid(index, STATUS_CODES, format!("invalid status code {}", value))
            }),
        Value::Array(items) if items.is_empty() => {
            Err(SchemaError::invalid(index, STATUS_CODES, "empty list"))
        }
        Value::Array(items) => {
            let mut codes = BTreeSet::new();
            for item in items {
                let code = status_code(item).ok_or_else(|| {
                    SchemaError::invalid(index, STATUS_CODES, format!("invalid status code {}", item))
                })?;
                codes.insert(code);
            }
            Ok(StatusCodes::Set(codes))
        }
        other => Err(SchemaError::invalid(
            index,
            STATUS_CODES,
            format!("unsupported {}", type_name(other)),
        )),
    }
}

/// A single status code given as an integral number or a numeric string
fn status_code(value: &Value) -> Option<u16> {
    let code = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u16::try_from(code)
        .ok()
        .filter(|code| StatusCodes::is_valid_code(*code))
}

/// Accepts a method name, a list of method names, or `any`
pub(crate) fn method(index: usize, entry: &Map<String, Value>) -> SchemaResult<MethodFilter> {
    let parse_one = |value: &Value| -> SchemaResult<Option<RequestMethod>> {
        match value {
            Value::String(s) if s.trim().eq_ignore_ascii_case("any") => Ok(None),
            Value::String(s) => s
                .parse::<RequestMethod>()
                .map(Some)
                .map_err(|detail| SchemaError::invalid(index, METHOD, detail)),
            other => Err(SchemaError::invalid(
                index,
                METHOD,
                format!("expected a string, got {}", type_name(other)),
            )),
        }
    };

    match present(entry, METHOD) {
        None => Ok(MethodFilter::Any),
        Some(Value::Array(items)) if items.is_empty() => {
            Err(SchemaError::invalid(index, METHOD, "empty list"))
        }
        Some(Value::Array(items)) => {
            let mut methods = BTreeSet::new();
            let mut any_seen = false;
            for item in items {
                match parse_one(item)? {
                    Some(method) => {
                        methods.insert(method);
                    }
                    None => any_seen = true,
                }
            }
            // every item is validated before `any` widens the filter
            if any_seen {
                Ok(MethodFilter::Any)
            } else {
                Ok(MethodFilter::Only(methods))
            }
        }
        Some(value) => Ok(match parse_one(value)? {
            Some(method) => MethodFilter::Only(BTreeSet::from([method])),
            None => MethodFilter::Any,
        }),
    }
}

/// Inline rule list or the name of a mapping definition, kept verbatim
pub(crate) fn mapping(index: usize, entry: &Map<String, Value>) -> SchemaResult<Mapping> {
    match present(entry, MAPPING) {
        None => Err(SchemaError::MissingField {
            entry: index,
            field: MAPPING,
        }),
        Some(Value::String(name)) if name.trim().is_empty() => {
            Err(SchemaError::invalid(index, MAPPING, "empty mapping reference"))
        }
        Some(Value::String(name)) => Ok(Mapping::NamedReference(name.clone())),
        Some(Value::Array(rules)) if rules.is_empty() => {
            Err(SchemaError::invalid(index, MAPPING, "empty rule list"))
        }
        Some(Value::Array(rules)) => rules
            .iter()
            .enumerate()
            .map(|(rule, value)| mapping_rule(index, rule, value))
            .collect::<SchemaResult<Vec<_>>>()
            .map(Mapping::Inline),
        Some(other) => Err(SchemaError::invalid(
            index,
            MAPPING,
            format!("expected a list of rules or a reference name, got {}", type_name(other)),
        )),
    }
}

fn mapping_rule(entry: usize, rule: usize, value: &Value) -> SchemaResult<MappingRule> {
    let invalid = |field| SchemaError::InvalidMappingRule { entry, rule, field };

    let object = value.as_object().ok_or_else(|| invalid(MAPPING))?;
    let required = |field: &'static str| -> SchemaResult<String> {
        object
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| invalid(field))
    };

    let source_key_path = required(SOURCE_KEY_PATH)?;
    let destination_attribute = required(DESTINATION_ATTRIBUTE)?;
    let transform = match object.get(TRANSFORM).filter(|v| !v.is_null()) {
        None => None,
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(_) => return Err(invalid(TRANSFORM)),
    };

    Ok(MappingRule {
        source_key_path,
        destination_attribute,
        transform,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
