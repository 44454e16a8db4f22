use super::{DetectionFactory, Subject};
use crate::context::ResolutionContext;
use crate::introspection::TypeKind;
use mapsmith_core::candidate::{
    CustomPrimitiveDeserializer, CustomPrimitiveSerializer, PrimitiveDeserializerSource, PrimitiveSerializerSource,
};
use mapsmith_core::{Deserializer, PrimitiveKind, Serializer};

/// Enums, mapped by constant name.
pub struct EnumFactory;

fn constants<'a>(subject: &'a Subject<'_>) -> Option<&'a [String]> {
    match &subject.description?.kind {
        TypeKind::Enum { constants } => Some(constants),
        _ => None,
    }
}

impl DetectionFactory for EnumFactory {
    fn name(&self) -> &'static str {
        "enums"
    }

    fn serializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Serializer> {
        constants(subject)
            .map(|constants| {
                Serializer::CustomPrimitive(CustomPrimitiveSerializer {
                    base: PrimitiveKind::String,
                    source: PrimitiveSerializerSource::Enum {
                        enum_type: subject.identifier.description(),
                        constants: constants.to_vec(),
                    },
                })
            })
            .into_iter()
            .collect()
    }

    fn deserializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Deserializer> {
        constants(subject)
            .map(|constants| {
                Deserializer::CustomPrimitive(CustomPrimitiveDeserializer {
                    base: PrimitiveKind::String,
                    source: PrimitiveDeserializerSource::Enum {
                        enum_type: subject.identifier.description(),
                        constants: constants.to_vec(),
                    },
                })
            })
            .into_iter()
            .collect()
    }
}
