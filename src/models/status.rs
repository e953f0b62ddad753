//! HTTP status code classifiers

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

static STATUS_CLASS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)([0-9])xx$").unwrap());

/// Lowest status code accepted in an explicit set
pub const MIN_STATUS_CODE: u16 = 100;
/// Highest status code accepted in an explicit set
pub const MAX_STATUS_CODE: u16 = 599;

/// A class of HTTP status codes (`1xx` .. `5xx`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusClass {
    Informational,
    Successful,
    Redirection,
    ClientError,
    ServerError,
}

impl StatusClass {
    /// All classes in ascending order
    pub const ALL: [StatusClass; 5] = [
        StatusClass::Informational,
        StatusClass::Successful,
        StatusClass::Redirection,
        StatusClass::ClientError,
        StatusClass::ServerError,
    ];

    /// Leading digit of the class
    pub fn digit(self) -> u16 {
        match self {
            StatusClass::Informational => 1,
            StatusClass::Successful => 2,
            StatusClass::Redirection => 3,
            StatusClass::ClientError => 4,
            StatusClass::ServerError => 5,
        }
    }

    /// Class for a leading digit, `None` outside 1..=5
    pub fn from_digit(digit: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.digit() == digit)
    }

    /// Class a concrete status code belongs to
    pub fn of(code: u16) -> Option<Self> {
        Self::from_digit(code / 100).filter(|class| class.range().contains(&code))
    }

    /// Inclusive range of codes covered, e.g. `200..=299`
    pub fn range(self) -> RangeInclusive<u16> {
        let start = self.digit() * 100;
        start..=start + 99
    }

    /// Parse the `Nxx` form (case-insensitive)
    pub fn parse(pattern: &str) -> Option<Self> {
        let captures = STATUS_CLASS_REGEX.captures(pattern.trim())?;
        let digit = captures.get(1)?.as_str().parse::<u16>().ok()?;
        Self::from_digit(digit)
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}xx", self.digit())
    }
}

/// The set of status codes a response descriptor applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCodes {
    /// Every status code
    Any,
    /// An open range tag covering a whole class
    Class(StatusClass),
    /// An explicit, non-empty set of codes
    Set(BTreeSet<u16>),
}

impl Default for StatusCodes {
    fn default() -> Self {
        Self::Any
    }
}

impl StatusCodes {
    /// Whether `code` is covered by this classifier
    pub fn contains(&self, code: u16) -> bool {
        match self {
            StatusCodes::Any => true,
            StatusCodes::Class(class) => class.range().contains(&code),
            StatusCodes::Set(codes) => codes.contains(&code),
        }
    }

    /// Smallest range covering every accepted code. `Any` covers the whole
    /// valid code space.
    pub fn range(&self) -> RangeInclusive<u16> {
        match self {
            StatusCodes::Any => MIN_STATUS_CODE..=MAX_STATUS_CODE,
            StatusCodes::Class(class) => class.range(),
            StatusCodes::Set(codes) => {
                let first = codes.first().copied().unwrap_or(MIN_STATUS_CODE);
                let last = codes.last().copied().unwrap_or(first);
                first..=last
            }
        }
    }

    /// Whether a single code is a valid member of an explicit set
    pub fn is_valid_code(code: u16) -> bool {
        (MIN_STATUS_CODE..=MAX_STATUS_CODE).contains(&code)
    }
}

impl fmt::Display for StatusCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCodes::Any => write!(f, "any"),
            StatusCodes::Class(class) => write!(f, "{}", class),
            StatusCodes::Set(codes) => {
                let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", codes.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_class() {
        assert_eq!(StatusClass::parse("2xx"), Some(StatusClass::Successful));
        assert_eq!(StatusClass::parse("4XX"), Some(StatusClass::ClientError));
        assert_eq!(StatusClass::parse(" 5xx "), Some(StatusClass::ServerError));
        assert_eq!(StatusClass::parse("9xx"), None);
        assert_eq!(StatusClass::parse("0xx"), None);
        assert_eq!(StatusClass::parse("2x"), None);
        assert_eq!(StatusClass::parse("any"), None);
    }

    #[test]
    fn test_class_of_code() {
        assert_eq!(StatusClass::of(204), Some(StatusClass::Successful));
        assert_eq!(StatusClass::of(599), Some(StatusClass::ServerError));
        assert_eq!(StatusClass::of(600), None);
        assert_eq!(StatusClass::of(42), None);
    }

    #[test]
    fn test_successful_range() {
        assert_eq!(StatusClass::Successful.range(), 200..=299);
        assert_eq!(StatusCodes::Class(StatusClass::Successful).range(), 200..=299);
    }

    #[test]
    fn test_contains() {
        let class = StatusCodes::Class(StatusClass::ClientError);
        assert!(class.contains(404));
        assert!(!class.contains(500));

        let set = StatusCodes::Set([200, 201].into_iter().collect());
        assert!(set.contains(201));
        assert!(!set.contains(202));
        assert_eq!(set.range(), 200..=201);

        assert!(StatusCodes::Any.contains(503));
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCodes::Any.to_string(), "any");
        assert_eq!(StatusCodes::Class(StatusClass::Redirection).to_string(), "3xx");
        assert_eq!(
            StatusCodes::Set([204, 200].into_iter().collect()).to_string(),
            "200,204"
        );
    }
}
