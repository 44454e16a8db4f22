use super::{DetectionFactory, Subject};
use crate::context::ResolutionContext;
use mapsmith_core::candidate::InlinedCollection;
use mapsmith_core::{Deserializer, Serializer};

/// Collections and arrays, mapped element by element.
pub struct CollectionFactory;

impl CollectionFactory {
    fn inlined(subject: &Subject<'_>) -> Option<InlinedCollection> {
        subject
            .identifier
            .collection_component()
            .map(|element| InlinedCollection::new(element.clone()))
    }
}

impl DetectionFactory for CollectionFactory {
    fn name(&self) -> &'static str {
        "collections"
    }

    fn serializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Serializer> {
        Self::inlined(subject)
            .map(Serializer::InlinedCollection)
            .into_iter()
            .collect()
    }

    fn deserializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Deserializer> {
        Self::inlined(subject)
            .map(Deserializer::InlinedCollection)
            .into_iter()
            .collect()
    }
}
