use mapsmith_core::{Deserializer, Direction, Serializer, TypeIdentifier};
use mapsmith_resolver::ManualOverride;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A declarative description of the types available for mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UniverseDescriptor {
    /// Types the caller explicitly wants mapped
    #[serde(default)]
    pub roots: Vec<RootEntry>,

    /// Serializers and deserializers registered by hand instead of detected
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,

    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RootEntry {
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub type_identifier: TypeIdentifier,
    #[serde(default)]
    pub direction: RootDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RootDirection {
    Serialization,
    Deserialization,
    #[default]
    Duplex,
}

impl From<RootDirection> for Direction {
    fn from(direction: RootDirection) -> Self {
        match direction {
            RootDirection::Serialization => Direction::Serialization,
            RootDirection::Deserialization => Direction::Deserialization,
            RootDirection::Duplex => Direction::Duplex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OverrideEntry {
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub type_identifier: TypeIdentifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<serde_json::Value>")]
    pub serializer: Option<Serializer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<serde_json::Value>")]
    pub deserializer: Option<Deserializer>,
}

impl OverrideEntry {
    pub fn manual_override(&self) -> ManualOverride {
        ManualOverride {
            serializer: self.serializer.clone(),
            deserializer: self.deserializer.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum KindEntry {
    #[default]
    Class,
    Enum,
    Abstract,
    Interface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModifiersEntry {
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub annotation: bool,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub inner_non_static: bool,
}

impl Default for ModifiersEntry {
    fn default() -> Self {
        Self {
            public: true,
            annotation: false,
            anonymous: false,
            local: false,
            inner_non_static: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeEntry {
    #[schemars(with = "String")]
    pub name: TypeIdentifier,
    #[serde(default)]
    pub kind: KindEntry,
    #[serde(default)]
    pub modifiers: ModifiersEntry,
    /// Constant names of an enum
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<String>,
    /// Declared subtypes of an abstract type or interface
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schemars(with = "Vec<String>")]
    pub subtypes: Vec<TypeIdentifier>,
    #[serde(default)]
    pub constructors: Vec<ConstructorEntry>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// A parameter; the name is missing when the source was compiled without parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub ty: TypeIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConstructorEntry {
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub returns: Option<TypeIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub ty: TypeIdentifier,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub transient: bool,
}
