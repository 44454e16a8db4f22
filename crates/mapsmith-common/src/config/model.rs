use mapsmith_core::TypeIdentifier;
use mapsmith_resolver::ResolutionContext;
use serde::{Deserialize, Serialize};

/// Root configuration from mapsmith.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapsmithConfig {
    /// Detection and disambiguation settings
    #[serde(default)]
    pub detection: DetectionSection,

    /// Output settings for the CLI
    #[serde(default)]
    pub output: OutputSection,
}

/// [detection] section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSection {
    pub custom_primitive_factory_names: Vec<String>,
    pub custom_primitive_serializer_names: Vec<String>,
    pub serialized_object_factory_names: Vec<String>,
    pub type_identifier_key: String,
    pub injected_types: Vec<TypeIdentifier>,
}

impl Default for DetectionSection {
    fn default() -> Self {
        let context = ResolutionContext::default();
        Self {
            custom_primitive_factory_names: context.custom_primitive_factory_names,
            custom_primitive_serializer_names: context.custom_primitive_serializer_names,
            serialized_object_factory_names: context.serialized_object_factory_names,
            type_identifier_key: context.type_identifier_key,
            injected_types: context.injected_types,
        }
    }
}

impl DetectionSection {
    pub fn to_context(&self) -> ResolutionContext {
        ResolutionContext {
            custom_primitive_factory_names: self.custom_primitive_factory_names.clone(),
            custom_primitive_serializer_names: self.custom_primitive_serializer_names.clone(),
            serialized_object_factory_names: self.serialized_object_factory_names.clone(),
            type_identifier_key: self.type_identifier_key.clone(),
            injected_types: self.injected_types.clone(),
        }
    }
}

/// [output] section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
