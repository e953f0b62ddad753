//! Configuration for resource resolution

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resource name used when no name is given
pub const DEFAULT_RESOURCE_NAME: &str = "ResponseDescriptors";

/// Configuration for the config loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Canonical resource name for default resolution
    pub default_resource_name: String,
    /// Extensions tried, in order, for resource names given without one
    pub extensions: Vec<String>,
    /// Directory of the primary resource scope. Defaults to the directory
    /// of the running executable.
    pub main_bundle: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_resource_name: DEFAULT_RESOURCE_NAME.to_string(),
            extensions: vec![
                "plist".to_string(),
                "json".to_string(),
                "yaml".to_string(),
                "yml".to_string(),
            ],
            main_bundle: None,
        }
    }
}

impl LoaderConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Only resolve property list resources
    pub fn plist_only() -> Self {
        Self {
            extensions: vec!["plist".to_string()],
            ..Self::default()
        }
    }

    /// Set the default resource name
    pub fn with_default_resource_name(mut self, name: impl Into<String>) -> Self {
        self.default_resource_name = name.into();
        self
    }

    /// Set the extensions tried for bare resource names
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Set the primary resource scope directory
    pub fn with_main_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.main_bundle = Some(path.into());
        self
    }
}
