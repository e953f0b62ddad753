//! Serialization formats a configuration resource may use
//!
//! Every format is parsed into the same nested key/value tree
//! (`serde_json::Value`). Property list values without a JSON counterpart
//! are converted: dates become RFC 3339 strings, data becomes base64 and
//! UIDs become integers.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use std::io::Cursor;
use std::path::Path;
use std::time::SystemTime;

/// Format of a configuration resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    /// XML or binary property list
    Plist,
    Json,
    Yaml,
}

impl ResourceFormat {
    /// Format implied by a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "plist" => Some(ResourceFormat::Plist),
            "json" => Some(ResourceFormat::Json),
            "yaml" | "yml" => Some(ResourceFormat::Yaml),
            _ => None,
        }
    }

    /// Detect the format from the resource path, falling back to the content
    pub fn detect(path: &str, content: &[u8]) -> Self {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_else(|| Self::sniff(content))
    }

    /// Detect the format from content alone
    pub fn sniff(content: &[u8]) -> Self {
        if content.starts_with(b"bplist") {
            return ResourceFormat::Plist;
        }

        let text = strip_bom(content);
        let start = text
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(text.len());
        let text = &text[start..];

        if text.starts_with(b"<?xml") || text.starts_with(b"<plist") || text.starts_with(b"<!DOCTYPE plist") {
            ResourceFormat::Plist
        } else if text.starts_with(b"{") || text.starts_with(b"[") {
            ResourceFormat::Json
        } else {
            ResourceFormat::Yaml
        }
    }

    /// Parse `content` into a nested key/value tree
    pub fn parse(self, content: &[u8]) -> Result<Value, String> {
        match self {
            ResourceFormat::Plist => {
                let value = plist::Value::from_reader(Cursor::new(content))
                    .map_err(|e| format!("Failed to parse property list: {}", e))?;
                plist_to_value(value)
            }
            ResourceFormat::Json => serde_json::from_slice(strip_bom(content))
                .map_err(|e| format!("Failed to parse JSON: {}", e)),
            ResourceFormat::Yaml => serde_yaml::from_slice(strip_bom(content))
                .map_err(|e| format!("Failed to parse YAML: {}", e)),
        }
    }
}

/// UTF-8 byte order mark, tolerated at the start of text resources
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

impl std::fmt::Display for ResourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceFormat::Plist => write!(f, "plist"),
            ResourceFormat::Json => write!(f, "json"),
            ResourceFormat::Yaml => write!(f, "yaml"),
        }
    }
}

fn plist_to_value(value: plist::Value) -> Result<Value, String> {
    let converted = match value {
        plist::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(plist_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        plist::Value::Dictionary(dict) => {
            let mut map = Map::new();
            for (key, item) in dict {
                map.insert(key, plist_to_value(item)?);
            }
            Value::Object(map)
        }
        plist::Value::Boolean(b) => Value::Bool(b),
        plist::Value::String(s) => Value::String(s),
        plist::Value::Integer(i) => match (i.as_signed(), i.as_unsigned()) {
            (Some(n), _) => Value::from(n),
            (None, Some(n)) => Value::from(n),
            (None, None) => return Err(format!("Integer out of range: {:?}", i)),
        },
        plist::Value::Real(r) => Number::from_f64(r)
            .map(Value::Number)
            .ok_or_else(|| format!("Non-finite real value: {}", r))?,
        plist::Value::Date(date) => {
            let time: DateTime<Utc> = SystemTime::from(date).into();
            Value::String(time.to_rfc3339())
        }
        plist::Value::Data(bytes) => Value::String(BASE64.encode(bytes)),
        plist::Value::Uid(uid) => Value::from(uid.get()),
        _ => return Err("Unsupported property list value".to_string()),
    };
    Ok(converted)
}
