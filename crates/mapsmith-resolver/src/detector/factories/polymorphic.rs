use super::{DetectionFactory, Subject};
use crate::context::ResolutionContext;
use crate::introspection::TypeKind;
use mapsmith_core::candidate::Polymorphic;
use mapsmith_core::{Deserializer, Serializer};

/// Abstract types and interfaces with declared subtypes.
pub struct PolymorphicFactory;

impl PolymorphicFactory {
    fn polymorphic(subject: &Subject<'_>, context: &ResolutionContext) -> Option<Polymorphic> {
        match &subject.description?.kind {
            TypeKind::Abstract { subtypes } if !subtypes.is_empty() => Some(Polymorphic::new(
                subject.identifier.clone(),
                context.type_identifier_key.clone(),
                subtypes,
            )),
            _ => None,
        }
    }
}

impl DetectionFactory for PolymorphicFactory {
    fn name(&self) -> &'static str {
        "polymorphic types"
    }

    fn serializers(&self, subject: &Subject<'_>, context: &ResolutionContext) -> Vec<Serializer> {
        Self::polymorphic(subject, context)
            .map(Serializer::Polymorphic)
            .into_iter()
            .collect()
    }

    fn deserializers(&self, subject: &Subject<'_>, context: &ResolutionContext) -> Vec<Deserializer> {
        Self::polymorphic(subject, context)
            .map(Deserializer::Polymorphic)
            .into_iter()
            .collect()
    }
}
