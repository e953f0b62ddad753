//! Config loader
//!
//! Reads the bytes behind a [`ResourceRef`] and parses them into a nested
//! key/value tree. Only reads are performed.

use super::config::LoaderConfig;
use super::error::{LoadError, LoadResult};
use super::format::ResourceFormat;
use super::{Bundle, ResourceRef};
use crate::storage::StorageError;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// A parsed configuration resource
#[derive(Debug, Clone)]
pub struct LoadedResource {
    /// Where the resource was read from
    pub location: String,
    pub format: ResourceFormat,
    pub value: Value,
}

/// Resolves resource references into nested key/value trees
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: LoaderConfig,
}

impl ConfigLoader {
    /// Create a loader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with the given configuration
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the nested key/value tree behind `reference`
    pub fn load(&self, reference: &ResourceRef) -> LoadResult<Value> {
        self.load_resource(reference).map(|resource| resource.value)
    }

    /// Load `reference`, keeping track of where it was found
    pub fn load_resource(&self, reference: &ResourceRef) -> LoadResult<LoadedResource> {
        let resource = match reference {
            ResourceRef::Default => {
                let bundle = self.main_bundle()?;
                self.load_from_bundle(&self.config.default_resource_name, &bundle)?
            }
            ResourceRef::Named(name) => {
                let bundle = self.main_bundle()?;
                self.load_from_bundle(name, &bundle)?
            }
            ResourceRef::Scoped { name, bundle } => self.load_from_bundle(name, bundle)?,
            ResourceRef::Path(path) => Self::load_from_path(path)?,
        };

        info!(
            "Loaded {} resource from {}",
            resource.format, resource.location
        );
        Ok(resource)
    }

    /// The primary resource scope
    pub fn main_bundle(&self) -> LoadResult<Bundle> {
        match &self.config.main_bundle {
            Some(path) => Ok(Bundle::at(path)),
            None => Bundle::main(),
        }
    }

    /// File names tried for a resource name, in order
    pub fn candidates(&self, name: &str) -> Vec<String> {
        if Path::new(name).extension().is_some() || self.config.extensions.is_empty() {
            return vec![name.to_string()];
        }
        self.config
            .extensions
            .iter()
            .map(|ext| format!("{}.{}", name, ext))
            .collect()
    }

    fn load_from_bundle(&self, name: &str, bundle: &Bundle) -> LoadResult<LoadedResource> {
        let backend = bundle.backend();
        let mut tried = Vec::new();

        for candidate in self.candidates(name) {
            let location = backend.location(&candidate);
            debug!("Resolving {} in bundle {}: {}", name, bundle.name(), location);

            // directories and other non-files never satisfy a candidate
            if !backend.file_exists(&candidate)? {
                tried.push(location);
                continue;
            }

            match backend.read_file(&candidate) {
                Ok(content) => {
                    let format = ResourceFormat::detect(&candidate, &content);
                    let value = format
                        .parse(&content)
                        .map_err(|message| LoadError::malformed(location.clone(), message))?;
                    return Ok(LoadedResource {
                        location,
                        format,
                        value,
                    });
                }
                Err(StorageError::FileNotFound(_)) => tried.push(location),
                Err(e) => return Err(e.into()),
            }
        }

        Err(LoadError::not_found(
            format!("{} in bundle {}", name, bundle.name()),
            tried,
        ))
    }

    fn load_from_path(path: &Path) -> LoadResult<LoadedResource> {
        let location = path.display().to_string();
        debug!("Resolving path {}", location);

        if !path.is_file() {
            return Err(LoadError::not_found(location.clone(), vec![location]));
        }

        let content = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::not_found(location.clone(), vec![location.clone()])
            } else {
                StorageError::IoError(format!("Failed to read file {}: {}", location, e)).into()
            }
        })?;

        let format = ResourceFormat::detect(&location, &content);
        let value = format
            .parse(&content)
            .map_err(|message| LoadError::malformed(location.clone(), message))?;

        Ok(LoadedResource {
            location,
            format,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorageBackend;
    use serde_json::json;
    use tempfile::TempDir;

    fn memory_bundle() -> Bundle {
        Bundle::with_backend(
            "embedded",
            MemoryStorageBackend::new("embedded")
                .with_file("Api.json", r#"[{"mapping": "Api"}]"#)
                .with_file("Api.yaml", "- mapping: ApiYaml\n")
                .with_file("Broken.json", "[{"),
        )
    }

    #[test]
    fn test_candidates() {
        let loader = ConfigLoader::new();
        assert_eq!(
            loader.candidates("Descriptors"),
            vec![
                "Descriptors.plist",
                "Descriptors.json",
                "Descriptors.yaml",
                "Descriptors.yml"
            ]
        );
        assert_eq!(loader.candidates("Descriptors.json"), vec!["Descriptors.json"]);
    }

    #[test]
    fn test_extension_order_decides() {
        let loader = ConfigLoader::new();
        let value = loader
            .load(&ResourceRef::scoped("Api", memory_bundle()))
            .unwrap();
        assert_eq!(value, json!([{"mapping": "Api"}]));

        let loader = ConfigLoader::with_config(LoaderConfig::new().with_extensions(["yaml"]));
        let value = loader
            .load(&ResourceRef::scoped("Api", memory_bundle()))
            .unwrap();
        assert_eq!(value, json!([{"mapping": "ApiYaml"}]));
    }

    #[test]
    fn test_missing_named_resource() {
        let loader = ConfigLoader::with_config(LoaderConfig::plist_only());
        let err = loader
            .load(&ResourceRef::scoped("Missing", memory_bundle()))
            .unwrap_err();
        match err {
            LoadError::ResourceNotFound { tried, .. } => {
                assert_eq!(tried, vec!["memory://embedded/Missing.plist"]);
            }
            other => panic!("Expected ResourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_resource() {
        let loader = ConfigLoader::new();
        let err = loader
            .load(&ResourceRef::scoped("Broken.json", memory_bundle()))
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedResource { .. }));
    }

    #[test]
    fn test_default_resource_in_configured_main_bundle() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("ResponseDescriptors.json"),
            r#"{"mapping": "Default"}"#,
        )
        .unwrap();

        let loader = ConfigLoader::with_config(LoaderConfig::new().with_main_bundle(temp.path()));
        let resource = loader.load_resource(&ResourceRef::Default).unwrap();
        assert_eq!(resource.format, ResourceFormat::Json);
        assert_eq!(resource.value, json!({"mapping": "Default"}));
        assert!(resource.location.ends_with("ResponseDescriptors.json"));
    }

    #[test]
    fn test_load_from_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("descriptors");
        std::fs::write(&path, "[]").unwrap();

        let resource = ConfigLoader::new()
            .load_resource(&ResourceRef::path(&path))
            .unwrap();
        assert_eq!(resource.format, ResourceFormat::Json);
        assert_eq!(resource.value, json!([]));
    }

    #[test]
    fn test_load_path_with_byte_order_mark() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("descriptors");
        std::fs::write(&path, b"\xEF\xBB\xBF[{\"mapping\": \"A\"}]").unwrap();

        let resource = ConfigLoader::new()
            .load_resource(&ResourceRef::path(&path))
            .unwrap();
        assert_eq!(resource.format, ResourceFormat::Json);
        assert_eq!(resource.value, json!([{"mapping": "A"}]));
    }

    #[test]
    fn test_directory_candidate_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("Api.plist")).unwrap();
        std::fs::write(temp.path().join("Api.json"), r#"{"mapping": "Api"}"#).unwrap();

        let resource = ConfigLoader::new()
            .load_resource(&ResourceRef::scoped("Api", Bundle::at(temp.path())))
            .unwrap();
        assert_eq!(resource.format, ResourceFormat::Json);
        assert!(resource.location.ends_with("Api.json"));

        let err = ConfigLoader::with_config(LoaderConfig::plist_only())
            .load(&ResourceRef::scoped("Api", Bundle::at(temp.path())))
            .unwrap_err();
        match err {
            LoadError::ResourceNotFound { tried, .. } => {
                assert_eq!(tried.len(), 1);
                assert!(tried[0].ends_with("Api.plist"));
            }
            other => panic!("Expected ResourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_path() {
        let temp = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .load(&ResourceRef::path(temp.path().join("nope.plist")))
            .unwrap_err();
        assert!(matches!(err, LoadError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_traversal_is_a_storage_error() {
        let temp = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .load(&ResourceRef::scoped("../secret", Bundle::at(temp.path())))
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Storage(StorageError::PermissionDenied(_))
        ));
    }
}
