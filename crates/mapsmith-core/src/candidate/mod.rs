//! Serializer and deserializer candidates.
//!
//! A candidate is one plausible strategy for mapping a type in one direction.
//! Detection gathers many of them; disambiguation picks at most one per direction.

pub mod custom_primitive;
pub mod mirror;
pub mod serialized_object;
pub mod shape;

pub use custom_primitive::{
    CustomPrimitiveDeserializer, CustomPrimitiveSerializer, PrimitiveDeserializerSource, PrimitiveSerializerSource,
};
pub use mirror::{mirrors, mirrors_fields};
pub use serialized_object::{
    FieldQuery, ObjectFactory, SerializationField, SerializedObjectDeserializer, SerializedObjectSerializer,
};
pub use shape::{InlinedCollection, InlinedMap, Polymorphic};

use crate::naming::TypeIdentifier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Serializer {
    CustomPrimitive(CustomPrimitiveSerializer),
    SerializedObject(SerializedObjectSerializer),
    InlinedCollection(InlinedCollection),
    Map(InlinedMap),
    Polymorphic(Polymorphic),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Deserializer {
    CustomPrimitive(CustomPrimitiveDeserializer),
    SerializedObject(SerializedObjectDeserializer),
    InlinedCollection(InlinedCollection),
    Map(InlinedMap),
    Polymorphic(Polymorphic),
}

impl Serializer {
    /// Types that must be serializable for this serializer to work.
    pub fn required_types(&self) -> Vec<TypeIdentifier> {
        match self {
            Self::CustomPrimitive(_) => Vec::new(),
            Self::SerializedObject(serializer) => {
                distinct(serializer.fields.iter().map(|field| &field.field_type))
            }
            Self::InlinedCollection(collection) => vec![collection.element.clone()],
            Self::Map(map) => distinct([&map.key, &map.value].into_iter()),
            Self::Polymorphic(polymorphic) => distinct(polymorphic.subtypes.values()),
        }
    }

    /// Polymorphic candidates require their subtypes to be mapped as objects.
    pub fn forces_dependencies_to_be_objects(&self) -> bool {
        matches!(self, Self::Polymorphic(_))
    }

    pub fn is_custom_primitive(&self) -> bool {
        matches!(self, Self::CustomPrimitive(_))
    }

    pub fn description(&self) -> String {
        match self {
            Self::CustomPrimitive(serializer) => serializer.description(),
            Self::SerializedObject(serializer) => serializer.description(),
            Self::InlinedCollection(collection) => format!("serializing {}", collection.description()),
            Self::Map(map) => format!("serializing {}", map.description()),
            Self::Polymorphic(polymorphic) => format!("serializing {}", polymorphic.description()),
        }
    }
}

impl Deserializer {
    /// Types that must be deserializable for this deserializer to work.
    pub fn required_types(&self) -> Vec<TypeIdentifier> {
        match self {
            Self::CustomPrimitive(_) => Vec::new(),
            Self::SerializedObject(deserializer) => distinct(deserializer.fields.values()),
            Self::InlinedCollection(collection) => vec![collection.element.clone()],
            Self::Map(map) => distinct([&map.key, &map.value].into_iter()),
            Self::Polymorphic(polymorphic) => distinct(polymorphic.subtypes.values()),
        }
    }

    pub fn forces_dependencies_to_be_objects(&self) -> bool {
        matches!(self, Self::Polymorphic(_))
    }

    pub fn is_custom_primitive(&self) -> bool {
        matches!(self, Self::CustomPrimitive(_))
    }

    pub fn description(&self) -> String {
        match self {
            Self::CustomPrimitive(deserializer) => deserializer.description(),
            Self::SerializedObject(deserializer) => deserializer.description(),
            Self::InlinedCollection(collection) => format!("deserializing {}", collection.description()),
            Self::Map(map) => format!("deserializing {}", map.description()),
            Self::Polymorphic(polymorphic) => format!("deserializing {}", polymorphic.description()),
        }
    }
}

fn distinct<'a>(types: impl Iterator<Item = &'a TypeIdentifier>) -> Vec<TypeIdentifier> {
    let mut result: Vec<TypeIdentifier> = Vec::new();
    for ty in types {
        if !result.contains(ty) {
            result.push(ty.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::PrimitiveKind;
    use indexmap::IndexMap;

    fn string() -> TypeIdentifier {
        TypeIdentifier::class("String")
    }

    #[test]
    fn test_serialized_object_requires_distinct_field_types() {
        let serializer = Serializer::SerializedObject(SerializedObjectSerializer::new(vec![
            SerializationField::public_field("first", string()),
            SerializationField::public_field("last", string()),
            SerializationField::getter("age", TypeIdentifier::class("int"), "getAge"),
        ]));
        assert_eq!(
            serializer.required_types(),
            vec![string(), TypeIdentifier::class("int")]
        );
    }

    #[test]
    fn test_custom_primitives_have_no_dependencies() {
        let deserializer = Deserializer::CustomPrimitive(CustomPrimitiveDeserializer::factory_method(
            PrimitiveKind::String,
            "fromString",
        ));
        assert!(deserializer.required_types().is_empty());
        assert!(!deserializer.forces_dependencies_to_be_objects());
        assert_eq!(
            deserializer.description(),
            "as custom primitive using factory method fromString(String)"
        );
    }

    #[test]
    fn test_polymorphic_forces_objects() {
        let polymorphic = Polymorphic::new(
            TypeIdentifier::class("Shape"),
            "type",
            &[TypeIdentifier::class("Circle"), TypeIdentifier::class("Square")],
        );
        assert_eq!(polymorphic.discriminator_for(&TypeIdentifier::class("Square")), Some("Square"));
        let serializer = Serializer::Polymorphic(polymorphic);
        assert!(serializer.forces_dependencies_to_be_objects());
        assert_eq!(serializer.required_types().len(), 2);
    }

    #[test]
    fn test_map_requires_key_and_value_once() {
        let map = InlinedMap::new(string(), TypeIdentifier::class("Order"));
        let serializer = Serializer::Map(map.clone());
        assert_eq!(serializer.required_types(), vec![string(), TypeIdentifier::class("Order")]);
        assert_eq!(
            serializer.description(),
            "serializing as map with key type 'String' and value type 'Order'"
        );
        let same = Deserializer::Map(InlinedMap::new(string(), string()));
        assert_eq!(same.required_types(), vec![string()]);
        assert_eq!(serde_json::to_value(&serializer).unwrap()["kind"], "map");
    }

    #[test]
    fn test_serialized_object_deserializer_description() {
        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), string());
        fields.insert("b".to_string(), TypeIdentifier::class("int"));
        let deserializer = SerializedObjectDeserializer::constructor(fields);
        assert_eq!(
            deserializer.description(),
            "as serialized object using constructor (a: String, b: int)"
        );
    }

    #[test]
    fn test_candidates_serialize_with_kind_tag() {
        let serializer = Serializer::CustomPrimitive(CustomPrimitiveSerializer::built_in(PrimitiveKind::Int));
        let json = serde_json::to_value(&serializer).unwrap();
        assert_eq!(json["kind"], "custom_primitive");
        assert_eq!(json["base"], "int");
    }
}
