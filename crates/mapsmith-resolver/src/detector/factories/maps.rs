use super::{DetectionFactory, Subject};
use crate::context::ResolutionContext;
use mapsmith_core::candidate::InlinedMap;
use mapsmith_core::{Deserializer, Serializer};

/// `Map<K, V>`, mapped entry by entry onto an object keyed by the serialized key.
pub struct MapFactory;

impl MapFactory {
    fn inlined(subject: &Subject<'_>) -> Option<InlinedMap> {
        subject
            .identifier
            .map_components()
            .map(|(key, value)| InlinedMap::new(key.clone(), value.clone()))
    }
}

impl DetectionFactory for MapFactory {
    fn name(&self) -> &'static str {
        "maps"
    }

    fn serializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Serializer> {
        Self::inlined(subject).map(Serializer::Map).into_iter().collect()
    }

    fn deserializers(&self, subject: &Subject<'_>, _context: &ResolutionContext) -> Vec<Deserializer> {
        Self::inlined(subject).map(Deserializer::Map).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsmith_core::TypeIdentifier;

    fn subject(ty: &TypeIdentifier) -> Subject<'_> {
        Subject {
            identifier: ty,
            description: None,
        }
    }

    #[test]
    fn test_map_yields_one_candidate_per_direction() -> anyhow::Result<()> {
        let ty = TypeIdentifier::parse("Map<String, List<Order>>")?;
        let context = ResolutionContext::default();
        let expected = InlinedMap::new(TypeIdentifier::class("String"), TypeIdentifier::parse("List<Order>")?);
        assert_eq!(
            MapFactory.serializers(&subject(&ty), &context),
            vec![Serializer::Map(expected.clone())]
        );
        assert_eq!(
            MapFactory.deserializers(&subject(&ty), &context),
            vec![Deserializer::Map(expected)]
        );
        Ok(())
    }

    #[test]
    fn test_other_generics_are_ignored() -> anyhow::Result<()> {
        let context = ResolutionContext::default();
        for input in ["List<String>", "Pair<String, String>", "HashMap<String, String>"] {
            let ty = TypeIdentifier::parse(input)?;
            assert!(MapFactory.serializers(&subject(&ty), &context).is_empty());
        }
        Ok(())
    }
}
