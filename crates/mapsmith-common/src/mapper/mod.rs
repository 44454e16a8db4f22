//! Converting native instances to and from universal values, driven by resolved definitions.

pub mod injector;
pub mod instance;

pub use self::injector::Injector;
pub use self::instance::Instance;

use crate::{CommonError, Result};
use indexmap::IndexMap;
use mapsmith_core::candidate::{PrimitiveDeserializerSource, PrimitiveSerializerSource};
use mapsmith_core::{Definition, Deserializer, Serializer, TypeIdentifier, Universal};
use mapsmith_resolver::ResolutionContext;

pub struct Mapper {
    definitions: IndexMap<TypeIdentifier, Definition>,
    type_identifier_key: String,
    injected_types: Vec<TypeIdentifier>,
    injector: Injector,
}

impl Mapper {
    pub fn new(definitions: IndexMap<TypeIdentifier, Definition>, context: &ResolutionContext) -> Self {
        Self {
            definitions,
            type_identifier_key: context.type_identifier_key.clone(),
            injected_types: context.injected_types.clone(),
            injector: Injector::default(),
        }
    }

    pub fn with_injector(mut self, injector: Injector) -> Self {
        self.injector = injector;
        self
    }

    fn serializer_for(&self, ty: &TypeIdentifier) -> Result<&Serializer> {
        self.definitions
            .get(ty)
            .and_then(|d| d.serializer.as_ref())
            .ok_or_else(|| CommonError::MissingDefinition {
                type_name: ty.description(),
                direction: "serializer",
            })
    }

    fn deserializer_for(&self, ty: &TypeIdentifier) -> Result<&Deserializer> {
        self.definitions
            .get(ty)
            .and_then(|d| d.deserializer.as_ref())
            .ok_or_else(|| CommonError::MissingDefinition {
                type_name: ty.description(),
                direction: "deserializer",
            })
    }

    /// Serializes an instance using the definition of its own type.
    pub fn serialize(&self, instance: &Instance) -> Result<Universal> {
        match instance.type_identifier() {
            Some(ty) => self.serialize_as(ty, instance),
            None => Ok(Universal::Null),
        }
    }

    /// Serializes an instance declared as `ty`; polymorphic declarations add the discriminator.
    pub fn serialize_as(&self, ty: &TypeIdentifier, instance: &Instance) -> Result<Universal> {
        if matches!(instance, Instance::Null) {
            return Ok(Universal::Null);
        }
        let unexpected = |expected: &'static str| CommonError::UnexpectedShape {
            type_name: ty.description(),
            expected,
            found: instance.describe(),
        };
        match self.serializer_for(ty)? {
            Serializer::CustomPrimitive(primitive) => {
                let Instance::Scalar { value, .. } = instance else {
                    return Err(unexpected("a scalar"));
                };
                if let PrimitiveSerializerSource::Enum { constants, .. } = &primitive.source {
                    check_constant(ty, constants, value)?;
                }
                Ok(value.clone())
            }
            Serializer::SerializedObject(object) => {
                let Instance::Object { fields, .. } = instance else {
                    return Err(unexpected("an object"));
                };
                let mut serialized = IndexMap::new();
                for field in &object.fields {
                    let value = fields.get(&field.name).ok_or_else(|| CommonError::MissingField {
                        type_name: ty.description(),
                        field: field.name.clone(),
                    })?;
                    serialized.insert(field.name.clone(), self.serialize_as(&field.field_type, value)?);
                }
                Ok(Universal::Object(serialized))
            }
            Serializer::InlinedCollection(collection) => {
                let Instance::Collection { elements, .. } = instance else {
                    return Err(unexpected("a collection"));
                };
                let elements = elements
                    .iter()
                    .map(|e| self.serialize_as(&collection.element, e))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Universal::Collection(elements))
            }
            Serializer::Map(map) => {
                let Instance::Map { entries, .. } = instance else {
                    return Err(unexpected("a map"));
                };
                let mut serialized = IndexMap::new();
                for (key, value) in entries {
                    let Universal::String(key) = self.serialize_as(&map.key, key)? else {
                        return Err(unexpected("a map with string keys"));
                    };
                    serialized.insert(key, self.serialize_as(&map.value, value)?);
                }
                Ok(Universal::Object(serialized))
            }
            Serializer::Polymorphic(polymorphic) => {
                let subtype = instance.type_identifier().ok_or_else(|| unexpected("a subtype instance"))?;
                let discriminator =
                    polymorphic
                        .discriminator_for(subtype)
                        .ok_or_else(|| CommonError::UnknownSubtype {
                            type_name: ty.description(),
                            value: subtype.description(),
                        })?;
                let mut serialized = match self.serialize_as(subtype, instance)? {
                    Universal::Object(map) => map,
                    _ => return Err(unexpected("an object subtype")),
                };
                serialized.insert(
                    polymorphic.discriminator_key.clone(),
                    Universal::String(discriminator.to_string()),
                );
                Ok(Universal::Object(serialized))
            }
        }
    }

    /// Deserializes `input` as an instance of `ty`.
    pub fn deserialize(&self, ty: &TypeIdentifier, input: &Universal) -> Result<Instance> {
        if matches!(input, Universal::Null) {
            return Ok(Instance::Null);
        }
        let unexpected = |expected: &'static str| CommonError::UnexpectedShape {
            type_name: ty.description(),
            expected,
            found: input.kind().to_string(),
        };
        match self.deserializer_for(ty)? {
            Deserializer::CustomPrimitive(primitive) => {
                if !input.is_primitive() {
                    return Err(unexpected("a scalar"));
                }
                if let PrimitiveDeserializerSource::Enum { constants, .. } = &primitive.source {
                    check_constant(ty, constants, input)?;
                }
                Ok(Instance::scalar(ty.clone(), input.clone()))
            }
            Deserializer::SerializedObject(object) => {
                let entries = input.as_object().ok_or_else(|| unexpected("an object"))?;
                let mut fields = IndexMap::new();
                for (name, field_type) in &object.fields {
                    let value = if self.injected_types.contains(field_type) {
                        self.injector
                            .value_for(field_type)
                            .cloned()
                            .ok_or_else(|| CommonError::MissingInjection(field_type.description()))?
                    } else {
                        match entries.get(name) {
                            Some(value) => self.deserialize(field_type, value)?,
                            None => Instance::Null,
                        }
                    };
                    fields.insert(name.clone(), value);
                }
                Ok(Instance::Object {
                    type_identifier: ty.clone(),
                    fields,
                })
            }
            Deserializer::InlinedCollection(collection) => {
                let items = input.as_collection().ok_or_else(|| unexpected("a collection"))?;
                let elements = items
                    .iter()
                    .map(|item| self.deserialize(&collection.element, item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Instance::Collection {
                    type_identifier: ty.clone(),
                    elements,
                })
            }
            Deserializer::Map(map) => {
                let items = input.as_object().ok_or_else(|| unexpected("an object"))?;
                let entries = items
                    .iter()
                    .map(|(key, value)| -> Result<(Instance, Instance)> {
                        let key = self.deserialize(&map.key, &Universal::String(key.clone()))?;
                        Ok((key, self.deserialize(&map.value, value)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Instance::Map {
                    type_identifier: ty.clone(),
                    entries,
                })
            }
            Deserializer::Polymorphic(polymorphic) => {
                let entries = input.as_object().ok_or_else(|| unexpected("an object"))?;
                let key = &polymorphic.discriminator_key;
                let discriminator = entries
                    .get(key)
                    .and_then(Universal::as_str)
                    .ok_or_else(|| unexpected("an object with a discriminator"))?;
                let subtype = polymorphic
                    .subtypes
                    .get(discriminator)
                    .ok_or_else(|| CommonError::UnknownSubtype {
                        type_name: ty.description(),
                        value: discriminator.to_string(),
                    })?;
                self.deserialize(subtype, input)
            }
        }
    }

    pub fn type_identifier_key(&self) -> &str {
        &self.type_identifier_key
    }
}

fn check_constant(ty: &TypeIdentifier, constants: &[String], value: &Universal) -> Result<()> {
    match value.as_str() {
        Some(name) if constants.iter().any(|c| c == name) => Ok(()),
        _ => Err(CommonError::UnknownConstant {
            type_name: ty.description(),
            value: format!("{:?}", value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::UniverseDescriptor;
    use rstest::rstest;

    fn ty(name: &str) -> TypeIdentifier {
        TypeIdentifier::parse(name).unwrap()
    }

    const UNIVERSE: &str = r#"{
        "roots": [
            { "type": "Order" },
            { "type": "Shape" }
        ],
        "types": [
            {
                "name": "Order",
                "fields": [
                    { "name": "id", "type": "OrderId" },
                    { "name": "lines", "type": "List<String>" },
                    { "name": "color", "type": "Color" }
                ],
                "constructors": [{ "parameters": [
                    { "name": "id", "type": "OrderId" },
                    { "name": "lines", "type": "List<String>" },
                    { "name": "color", "type": "Color" }
                ] }]
            },
            {
                "name": "OrderId",
                "methods": [
                    { "name": "stringValue", "returns": "String" },
                    { "name": "fromString", "static": true, "returns": "OrderId",
                      "parameters": [{ "name": "value", "type": "String" }] }
                ]
            },
            { "name": "Color", "kind": "enum", "constants": ["RED", "GREEN"] },
            { "name": "Shape", "kind": "interface", "subtypes": ["Circle"] },
            {
                "name": "Circle",
                "fields": [{ "name": "radius", "type": "int" }],
                "constructors": [{ "parameters": [{ "name": "radius", "type": "int" }] }]
            }
        ]
    }"#;

    fn mapper() -> anyhow::Result<Mapper> {
        let universe: UniverseDescriptor = serde_json::from_str(UNIVERSE)?;
        let context = ResolutionContext::default();
        let mut orchestrator = universe.orchestrator(context.clone())?;
        let definitions = orchestrator.resolve_all()?.into_result()?;
        Ok(Mapper::new(definitions, &context))
    }

    fn order() -> Instance {
        Instance::object(
            ty("Order"),
            [
                (
                    "id".to_string(),
                    Instance::scalar(ty("OrderId"), Universal::String("o-1".into())),
                ),
                (
                    "lines".to_string(),
                    Instance::Collection {
                        type_identifier: ty("List<String>"),
                        elements: vec![Instance::scalar(ty("String"), Universal::String("pen".into()))],
                    },
                ),
                (
                    "color".to_string(),
                    Instance::scalar(ty("Color"), Universal::String("RED".into())),
                ),
            ],
        )
    }

    #[test]
    fn test_round_trip_reproduces_the_instance() -> anyhow::Result<()> {
        let mapper = mapper()?;
        let universal = mapper.serialize(&order())?;
        let back = mapper.deserialize(&ty("Order"), &universal)?;
        assert!(back.mirrors(&order()));
        Ok(())
    }

    #[test]
    fn test_polymorphic_values_carry_the_discriminator() -> anyhow::Result<()> {
        let mapper = mapper()?;
        let circle = Instance::object(
            ty("Circle"),
            [("radius".to_string(), Instance::scalar(ty("int"), Universal::Integer(3)))],
        );
        let universal = mapper.serialize_as(&ty("Shape"), &circle)?;
        let entries = universal.as_object().unwrap();
        assert_eq!(entries.get("type"), Some(&Universal::String("Circle".into())));

        let back = mapper.deserialize(&ty("Shape"), &universal)?;
        assert!(back.mirrors(&circle));
        Ok(())
    }

    #[test]
    fn test_maps_serialize_as_objects_keyed_by_the_serialized_key() -> anyhow::Result<()> {
        let map_type = ty("Map<OrderId, Color>");
        let universe: UniverseDescriptor = serde_json::from_str(
            r#"{
                "roots": [{ "type": "Map<OrderId, Color>" }],
                "types": [
                    {
                        "name": "OrderId",
                        "methods": [
                            { "name": "stringValue", "returns": "String" },
                            { "name": "fromString", "static": true, "returns": "OrderId",
                              "parameters": [{ "name": "value", "type": "String" }] }
                        ]
                    },
                    { "name": "Color", "kind": "enum", "constants": ["RED", "GREEN"] }
                ]
            }"#,
        )?;
        let context = ResolutionContext::default();
        let definitions = universe.orchestrator(context.clone())?.resolve_all()?.into_result()?;
        let mapper = Mapper::new(definitions, &context);

        let entry = |id: &str, color: &str| {
            (
                Instance::scalar(ty("OrderId"), Universal::String(id.into())),
                Instance::scalar(ty("Color"), Universal::String(color.into())),
            )
        };
        let colors = Instance::Map {
            type_identifier: map_type.clone(),
            entries: vec![entry("o-2", "GREEN"), entry("o-1", "RED")],
        };
        let universal = mapper.serialize(&colors)?;
        let entries = universal.as_object().unwrap();
        assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["o-2", "o-1"]);
        assert_eq!(entries.get("o-1"), Some(&Universal::String("RED".into())));

        let back = mapper.deserialize(&map_type, &universal)?;
        assert!(back.mirrors(&colors));

        let not_an_object = mapper.deserialize(&map_type, &Universal::Collection(Vec::new()));
        assert!(matches!(not_an_object, Err(CommonError::UnexpectedShape { .. })));
        Ok(())
    }

    #[rstest]
    #[case(Universal::String("BLUE".into()))]
    #[case(Universal::String("red".into()))]
    #[case(Universal::Integer(0))]
    fn test_unknown_enum_constant_is_rejected(#[case] input: Universal) -> anyhow::Result<()> {
        let mapper = mapper()?;
        let result = mapper.deserialize(&ty("Color"), &input);
        assert!(matches!(result, Err(CommonError::UnknownConstant { .. })));
        Ok(())
    }

    #[test]
    fn test_injected_fields_come_from_the_injector() -> anyhow::Result<()> {
        let clock = ty("Clock");
        let context = ResolutionContext::default().with_injected(clock.clone());
        let universe: UniverseDescriptor = serde_json::from_str(
            r#"{
                "roots": [{ "type": "Event", "direction": "deserialization" }],
                "types": [{
                    "name": "Event",
                    "constructors": [{ "parameters": [
                        { "name": "name", "type": "String" },
                        { "name": "clock", "type": "Clock" }
                    ] }]
                }]
            }"#,
        )?;
        let definitions = universe.orchestrator(context.clone())?.resolve_all()?.into_result()?;
        let now = Instance::scalar(clock.clone(), Universal::Integer(42));
        let mapper = Mapper::new(definitions, &context).with_injector(Injector::new().with(clock, now.clone()));

        let mut input = IndexMap::new();
        input.insert("name".to_string(), Universal::String("boot".into()));
        let event = mapper.deserialize(&ty("Event"), &Universal::Object(input))?;
        match event {
            Instance::Object { fields, .. } => assert_eq!(fields.get("clock"), Some(&now)),
            other => panic!("unexpected instance {:?}", other),
        }
        Ok(())
    }
}
