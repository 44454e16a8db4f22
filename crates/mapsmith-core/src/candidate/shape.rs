use crate::naming::TypeIdentifier;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A collection or array mapped directly onto a universal collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlinedCollection {
    pub element: TypeIdentifier,
}

impl InlinedCollection {
    pub fn new(element: TypeIdentifier) -> Self {
        Self { element }
    }

    pub fn description(&self) -> String {
        format!("as inlined collection with content type '{}'", self.element.description())
    }
}

/// A map mapped onto a universal object, keyed by the string form of each key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlinedMap {
    pub key: TypeIdentifier,
    pub value: TypeIdentifier,
}

impl InlinedMap {
    pub fn new(key: TypeIdentifier, value: TypeIdentifier) -> Self {
        Self { key, value }
    }

    pub fn description(&self) -> String {
        format!(
            "as map with key type '{}' and value type '{}'",
            self.key.description(),
            self.value.description()
        )
    }
}

/// A super type mapped through one of its subtypes, tagged with a discriminator entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polymorphic {
    pub super_type: TypeIdentifier,
    pub discriminator_key: String,
    /// Discriminator value to subtype.
    pub subtypes: IndexMap<String, TypeIdentifier>,
}

impl Polymorphic {
    pub fn new(super_type: TypeIdentifier, discriminator_key: impl Into<String>, subtypes: &[TypeIdentifier]) -> Self {
        let subtypes = subtypes
            .iter()
            .map(|subtype| (subtype.description(), subtype.clone()))
            .collect();
        Self {
            super_type,
            discriminator_key: discriminator_key.into(),
            subtypes,
        }
    }

    pub fn discriminator_for(&self, subtype: &TypeIdentifier) -> Option<&str> {
        self.subtypes
            .iter()
            .find(|(_, candidate)| *candidate == subtype)
            .map(|(value, _)| value.as_str())
    }

    pub fn description(&self) -> String {
        let subtypes: Vec<&str> = self.subtypes.keys().map(String::as_str).collect();
        format!(
            "as polymorphic type over [{}] keyed by '{}'",
            subtypes.join(", "),
            self.discriminator_key
        )
    }
}
