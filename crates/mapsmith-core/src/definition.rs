use crate::candidate::{Deserializer, Serializer};
use crate::error::{Error, Result};
use crate::naming::TypeIdentifier;
use serde::{Deserialize, Serialize};

/// The resolved mapping of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(rename = "type")]
    pub type_identifier: TypeIdentifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serializer: Option<Serializer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deserializer: Option<Deserializer>,
}

impl Definition {
    pub fn new(
        type_identifier: TypeIdentifier,
        serializer: Option<Serializer>,
        deserializer: Option<Deserializer>,
    ) -> Result<Self> {
        if serializer.is_none() && deserializer.is_none() {
            return Err(Error::EmptyDefinition(type_identifier.description()));
        }
        Ok(Self {
            type_identifier,
            serializer,
            deserializer,
        })
    }

    pub fn duplex(type_identifier: TypeIdentifier, serializer: Serializer, deserializer: Deserializer) -> Self {
        Self {
            type_identifier,
            serializer: Some(serializer),
            deserializer: Some(deserializer),
        }
    }

    pub fn is_duplex(&self) -> bool {
        self.serializer.is_some() && self.deserializer.is_some()
    }

    pub fn classification(&self) -> &'static str {
        match (&self.serializer, &self.deserializer) {
            (Some(Serializer::CustomPrimitive(_)), _) | (None, Some(Deserializer::CustomPrimitive(_))) => {
                "Custom Primitive"
            }
            (Some(Serializer::SerializedObject(_)), _) | (None, Some(Deserializer::SerializedObject(_))) => {
                "Serialized Object"
            }
            (Some(Serializer::InlinedCollection(_)), _) | (None, Some(Deserializer::InlinedCollection(_))) => {
                "Collection"
            }
            (Some(Serializer::Map(_)), _) | (None, Some(Deserializer::Map(_))) => "Map",
            _ => "Polymorphic",
        }
    }
}
