use super::{DetectionFactory, Subject};
use crate::context::ResolutionContext;
use mapsmith_core::candidate::{
    CustomPrimitiveDeserializer, CustomPrimitiveSerializer, PrimitiveDeserializerSource, PrimitiveSerializerSource,
};
use mapsmith_core::{Deserializer, PrimitiveKind, Serializer};

/// Classes wrapping a single built-in scalar.
///
/// Serializers are public no-argument instance methods with a configured name
/// returning a built-in scalar. Deserializers are static factories and
/// constructors taking exactly one built-in scalar.
pub struct CustomPrimitiveFactory;

impl DetectionFactory for CustomPrimitiveFactory {
    fn name(&self) -> &'static str {
        "custom primitives"
    }

    fn serializers(&self, subject: &Subject<'_>, context: &ResolutionContext) -> Vec<Serializer> {
        let Some(description) = subject.class_description() else {
            return Vec::new();
        };
        description
            .methods
            .iter()
            .filter(|m| m.public && !m.is_static && m.parameters.is_empty())
            .filter(|m| context.is_custom_primitive_serializer_name(&m.name))
            .filter_map(|m| {
                let base = m.return_type.as_ref().and_then(PrimitiveKind::of)?;
                Some(Serializer::CustomPrimitive(CustomPrimitiveSerializer {
                    base,
                    source: PrimitiveSerializerSource::Method { name: m.name.clone() },
                }))
            })
            .collect()
    }

    fn deserializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Deserializer> {
        let Some(description) = subject.class_description() else {
            return Vec::new();
        };
        let single_primitive = |parameters: &[crate::introspection::Parameter]| match parameters {
            [only] => PrimitiveKind::of(&only.ty),
            _ => None,
        };

        let factories = description
            .methods
            .iter()
            .filter(|m| m.is_static && m.return_type.as_ref() == Some(subject.identifier))
            .filter_map(|m| {
                let base = single_primitive(m.parameters.as_slice())?;
                Some(Deserializer::CustomPrimitive(CustomPrimitiveDeserializer {
                    base,
                    source: PrimitiveDeserializerSource::FactoryMethod {
                        name: m.name.clone(),
                        public: m.public,
                        is_static: m.is_static,
                    },
                }))
            });
        let constructors = description.constructors.iter().filter_map(|c| {
            let base = single_primitive(c.parameters.as_slice())?;
            Some(Deserializer::CustomPrimitive(CustomPrimitiveDeserializer {
                base,
                source: PrimitiveDeserializerSource::Constructor { public: c.public },
            }))
        });
        factories.chain(constructors).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::TypeDescription;
    use mapsmith_core::TypeIdentifier;

    #[test]
    fn test_detects_configured_serializer_and_factories() {
        let ty = TypeIdentifier::class("EmailAddress");
        let string = TypeIdentifier::class("String");
        let description = TypeDescription::class(ty.clone())
            .with_accessor("stringValue", string.clone())
            .with_accessor("length", TypeIdentifier::class("int"))
            .with_factory("fromString", &[("value", string.clone())])
            .with_constructor(&[("value", string.clone())])
            .with_constructor(&[("local", string.clone()), ("domain", string)]);
        let subject = Subject {
            identifier: &ty,
            description: Some(&description),
        };
        let context = ResolutionContext::default();

        let serializers = CustomPrimitiveFactory.serializers(&subject, &context);
        assert_eq!(serializers.len(), 1);
        assert!(serializers[0].description().contains("stringValue"));

        let deserializers = CustomPrimitiveFactory.deserializers(&subject, &context);
        assert_eq!(deserializers.len(), 2);
    }
}
