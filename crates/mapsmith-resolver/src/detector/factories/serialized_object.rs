use super::{DetectionFactory, Subject};
use crate::context::ResolutionContext;
use crate::introspection::{Method, Parameter};
use indexmap::IndexMap;
use mapsmith_core::candidate::{
    FieldQuery, ObjectFactory, SerializationField, SerializedObjectDeserializer, SerializedObjectSerializer,
};
use mapsmith_core::{Deserializer, PrimitiveKind, Serializer, TypeIdentifier};

/// Classes mapped as objects: fields and accessors out, constructors and factories in.
pub struct SerializedObjectFactory;

/// Field name exposed by a `getX`/`isX` accessor.
fn accessor_field_name(method: &Method) -> Option<String> {
    if !method.public || method.is_static || !method.parameters.is_empty() || method.name == "getClass" {
        return None;
    }
    let return_type = method.return_type.as_ref()?;
    let rest = if let Some(rest) = method.name.strip_prefix("get") {
        rest
    } else if let Some(rest) = method.name.strip_prefix("is") {
        if PrimitiveKind::of(return_type) != Some(PrimitiveKind::Boolean) {
            return None;
        }
        rest
    } else {
        return None;
    };
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    Some(first.to_lowercase().chain(chars).collect())
}

fn parameter_fields(parameters: &[Parameter]) -> IndexMap<String, TypeIdentifier> {
    parameters
        .iter()
        .map(|p| (p.name.clone(), p.ty.clone()))
        .collect()
}

impl DetectionFactory for SerializedObjectFactory {
    fn name(&self) -> &'static str {
        "serialized objects"
    }

    fn serializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Serializer> {
        let Some(description) = subject.class_description() else {
            return Vec::new();
        };
        let mut fields: Vec<SerializationField> = description
            .fields
            .iter()
            .map(|f| SerializationField {
                name: f.name.clone(),
                field_type: f.ty.clone(),
                query: FieldQuery::Field {
                    public: f.public,
                    is_static: f.is_static,
                    transient: f.transient,
                },
            })
            .collect();
        fields.extend(description.methods.iter().filter_map(|m| {
            let name = accessor_field_name(m)?;
            let field_type = m.return_type.clone()?;
            Some(SerializationField::getter(name, field_type, m.name.clone()))
        }));
        if fields.is_empty() {
            return Vec::new();
        }
        vec![Serializer::SerializedObject(SerializedObjectSerializer::new(fields))]
    }

    fn deserializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Deserializer> {
        let Some(description) = subject.class_description() else {
            return Vec::new();
        };
        let constructors = description
            .constructors
            .iter()
            .filter(|c| !c.parameters.is_empty())
            .map(|c| SerializedObjectDeserializer {
                fields: parameter_fields(&c.parameters),
                factory: ObjectFactory::Constructor { public: c.public },
            });
        let factories = description
            .methods
            .iter()
            .filter(|m| m.is_static && !m.parameters.is_empty())
            .filter(|m| m.return_type.as_ref() == Some(subject.identifier))
            .map(|m| SerializedObjectDeserializer {
                fields: parameter_fields(&m.parameters),
                factory: ObjectFactory::FactoryMethod {
                    name: m.name.clone(),
                    public: m.public,
                    is_static: m.is_static,
                },
            });
        constructors
            .chain(factories)
            .map(Deserializer::SerializedObject)
            .collect()
    }
}
