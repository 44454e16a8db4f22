use super::{DetectionFactory, Subject};
use crate::context::ResolutionContext;
use mapsmith_core::candidate::{CustomPrimitiveDeserializer, CustomPrimitiveSerializer};
use mapsmith_core::{Deserializer, PrimitiveKind, Serializer};

/// `String`, `int`, `Integer` and the other built-in scalars.
pub struct BuiltInPrimitiveFactory;

impl DetectionFactory for BuiltInPrimitiveFactory {
    fn name(&self) -> &'static str {
        "built-in primitives"
    }

    fn serializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Serializer> {
        PrimitiveKind::of(subject.identifier)
            .map(|kind| Serializer::CustomPrimitive(CustomPrimitiveSerializer::built_in(kind)))
            .into_iter()
            .collect()
    }

    fn deserializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Deserializer> {
        PrimitiveKind::of(subject.identifier)
            .map(|kind| Deserializer::CustomPrimitive(CustomPrimitiveDeserializer::built_in(kind)))
            .into_iter()
            .collect()
    }
}
