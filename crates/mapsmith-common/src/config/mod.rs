//! Configuration module
//!
//! Handles loading and discovery of mapsmith configuration files (mapsmith.toml, mapsmith.json).

pub mod model;

use std::path::{Path, PathBuf};
use tracing::debug;

pub use self::model::*;

const CONFIG_FILE_NAMES: [&str; 2] = ["mapsmith.toml", "mapsmith.json"];

impl MapsmithConfig {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        if path.extension().is_some_and(|ext| ext == "json") {
            return Ok(serde_json::from_str(&content)?);
        }

        // Default to TOML
        Ok(toml::from_str(&content)?)
    }

    /// Load the nearest configuration above `start_dir`, or the defaults if there is none
    pub fn discover(start_dir: &Path) -> crate::Result<Self> {
        match discover_config(start_dir) {
            Some(path) => {
                debug!("Using configuration from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Walk up directory tree to find mapsmith.toml or mapsmith.json
pub fn discover_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.exists())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsmith_core::TypeIdentifier;

    #[test]
    fn test_load_toml() -> anyhow::Result<()> {
        let toml_content = r#"
[detection]
serialized_object_factory_names = ["create"]
injected_types = ["com.example.Clock"]

[output]
format = "json"
"#;
        let dir = tempfile::tempdir()?;
        let file_path = dir.path().join("mapsmith.toml");
        std::fs::write(&file_path, toml_content)?;

        let config = MapsmithConfig::load(&file_path)?;
        assert_eq!(config.output.format, OutputFormat::Json);
        let context = config.detection.to_context();
        assert_eq!(context.serialized_object_factory_names, vec!["create"]);
        assert!(context.is_injected(&TypeIdentifier::class("com.example.Clock")));
        // Keys that are not set keep their defaults
        assert_eq!(context.type_identifier_key, "type");
        Ok(())
    }

    #[test]
    fn test_load_json() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let file_path = dir.path().join("mapsmith.json");
        std::fs::write(&file_path, r#"{ "detection": { "type_identifier_key": "@type" } }"#)?;

        let config = MapsmithConfig::load(&file_path)?;
        assert_eq!(config.detection.type_identifier_key, "@type");
        assert_eq!(config.output.format, OutputFormat::Text);
        Ok(())
    }

    #[test]
    fn test_discover_walks_up() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested)?;
        std::fs::write(dir.path().join("mapsmith.toml"), "")?;

        assert_eq!(discover_config(&nested), Some(dir.path().join("mapsmith.toml")));
        assert_eq!(MapsmithConfig::discover(&nested)?, MapsmithConfig::default());
        Ok(())
    }
}
