use crate::naming::PrimitiveKind;
use serde::{Deserialize, Serialize};

/// Where a custom primitive serializer reads its scalar from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PrimitiveSerializerSource {
    BuiltIn,
    Enum { enum_type: String, constants: Vec<String> },
    Method { name: String },
}

/// Where a custom primitive deserializer builds its value from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PrimitiveDeserializerSource {
    BuiltIn,
    Enum { enum_type: String, constants: Vec<String> },
    FactoryMethod { name: String, public: bool, is_static: bool },
    Constructor { public: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPrimitiveSerializer {
    pub base: PrimitiveKind,
    pub source: PrimitiveSerializerSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPrimitiveDeserializer {
    pub base: PrimitiveKind,
    pub source: PrimitiveDeserializerSource,
}

impl CustomPrimitiveSerializer {
    pub fn built_in(base: PrimitiveKind) -> Self {
        Self {
            base,
            source: PrimitiveSerializerSource::BuiltIn,
        }
    }

    pub fn method(base: PrimitiveKind, name: impl Into<String>) -> Self {
        Self {
            base,
            source: PrimitiveSerializerSource::Method { name: name.into() },
        }
    }

    pub fn description(&self) -> String {
        match &self.source {
            PrimitiveSerializerSource::BuiltIn => format!("as built-in primitive {}", self.base),
            PrimitiveSerializerSource::Enum { enum_type, .. } => {
                format!("as custom primitive using names of enum {}", enum_type)
            }
            PrimitiveSerializerSource::Method { name } => {
                format!("as custom primitive using method {}() -> {}", name, self.base)
            }
        }
    }
}

impl CustomPrimitiveDeserializer {
    pub fn built_in(base: PrimitiveKind) -> Self {
        Self {
            base,
            source: PrimitiveDeserializerSource::BuiltIn,
        }
    }

    pub fn factory_method(base: PrimitiveKind, name: impl Into<String>) -> Self {
        Self {
            base,
            source: PrimitiveDeserializerSource::FactoryMethod {
                name: name.into(),
                public: true,
                is_static: true,
            },
        }
    }

    pub fn constructor(base: PrimitiveKind) -> Self {
        Self {
            base,
            source: PrimitiveDeserializerSource::Constructor { public: true },
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.source, PrimitiveDeserializerSource::Enum { .. })
    }

    pub fn factory_name(&self) -> Option<&str> {
        match &self.source {
            PrimitiveDeserializerSource::FactoryMethod { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn description(&self) -> String {
        match &self.source {
            PrimitiveDeserializerSource::BuiltIn => format!("as built-in primitive {}", self.base),
            PrimitiveDeserializerSource::Enum { enum_type, .. } => {
                format!("as custom primitive using values of enum {}", enum_type)
            }
            PrimitiveDeserializerSource::FactoryMethod { name, .. } => {
                format!("as custom primitive using factory method {}({})", name, self.base)
            }
            PrimitiveDeserializerSource::Constructor { .. } => {
                format!("as custom primitive using constructor ({})", self.base)
            }
        }
    }
}
