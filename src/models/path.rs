//! URL path patterns

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static PARAMETER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:([A-Za-z_][A-Za-z0-9_]*)(.*)$").unwrap());

/// Pattern matched against request URL paths
///
/// Patterns use `/`-separated segments. A segment starting with `:name`
/// holds a placeholder: the name ends at the first character that is not
/// alphanumeric or `_`, and the rest of the segment is a literal suffix
/// (`:id.json` matches `42.json` but not `42.xml`). The placeholder matches
/// a non-empty value. Other segments must match literally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathPattern {
    /// Matches every path
    #[default]
    Any,
    /// A concrete pattern such as `/users/:id`
    Pattern(String),
}

impl PathPattern {
    /// Build a pattern, mapping an empty string to the match-any sentinel
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            PathPattern::Any
        } else {
            PathPattern::Pattern(pattern)
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, PathPattern::Any)
    }

    /// Pattern text, `None` for the match-any sentinel
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PathPattern::Any => None,
            PathPattern::Pattern(pattern) => Some(pattern),
        }
    }

    /// Names of the `:name` placeholders in declaration order
    pub fn parameters(&self) -> Vec<&str> {
        match self {
            PathPattern::Any => Vec::new(),
            PathPattern::Pattern(pattern) => segments(pattern)
                .filter_map(|segment| PARAMETER_REGEX.captures(segment))
                .filter_map(|captures| captures.get(1))
                .map(|m| m.as_str())
                .collect(),
        }
    }

    /// Whether `path` is matched by this pattern. Query strings are ignored.
    pub fn matches(&self, path: &str) -> bool {
        let pattern = match self {
            PathPattern::Any => return true,
            PathPattern::Pattern(pattern) => pattern,
        };

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut expected = segments(pattern);
        let mut actual = segments(path);

        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(want), Some(got)) => {
                    if let Some(captures) = PARAMETER_REGEX.captures(want) {
                        let suffix = captures.get(2).map_or("", |m| m.as_str());
                        match got.strip_suffix(suffix) {
                            Some(value) if !value.is_empty() => continue,
                            _ => return false,
                        }
                    }
                    if want != got {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Any => write!(f, "*"),
            PathPattern::Pattern(pattern) => write!(f, "{}", pattern),
        }
    }
}
