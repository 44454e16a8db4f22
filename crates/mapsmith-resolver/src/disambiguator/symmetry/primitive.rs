use mapsmith_core::{Deserializer, PrimitiveKind, Serializer};

fn serializer_base(serializer: &Serializer) -> Option<PrimitiveKind> {
    match serializer {
        Serializer::CustomPrimitive(cp) => Some(cp.base),
        _ => None,
    }
}

fn deserializer_base(deserializer: &Deserializer) -> Option<PrimitiveKind> {
    match deserializer {
        Deserializer::CustomPrimitive(cp) => Some(cp.base),
        _ => None,
    }
}

/// The most preferred base kind offered by both a serializer and a deserializer.
pub fn symmetric_base(serializers: &[Serializer], deserializers: &[Deserializer]) -> Option<PrimitiveKind> {
    PrimitiveKind::PREFERENCE_ORDER.into_iter().find(|kind| {
        serializers.iter().any(|s| serializer_base(s) == Some(*kind))
            && deserializers.iter().any(|d| deserializer_base(d) == Some(*kind))
    })
}

pub fn serializers_of(serializers: Vec<Serializer>, base: PrimitiveKind) -> Vec<Serializer> {
    serializers
        .into_iter()
        .filter(|s| serializer_base(s) == Some(base))
        .collect()
}

pub fn deserializers_of(deserializers: Vec<Deserializer>, base: PrimitiveKind) -> Vec<Deserializer> {
    deserializers
        .into_iter()
        .filter(|d| deserializer_base(d) == Some(base))
        .collect()
}
