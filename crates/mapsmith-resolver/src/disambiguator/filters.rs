//! Candidates that are never eligible, with the reason they are struck.

use mapsmith_core::candidate::{
    FieldQuery, ObjectFactory, PrimitiveDeserializerSource, SerializationField,
};
use mapsmith_core::Deserializer;

pub const HAS_TO_BE_OBJECT: &str = "type has to be serialized as an object";
const PUBLIC_CONSTRUCTORS_ONLY: &str = "only public constructors are considered for deserialization";
const PUBLIC_STATIC_METHODS_ONLY: &str = "only public static methods are considered for deserialization";

pub fn serialization_field_rejection(field: &SerializationField) -> Option<&'static str> {
    match field.query {
        FieldQuery::Field { is_static: true, .. } => Some("static fields are not serialized"),
        FieldQuery::Field { transient: true, .. } => Some("transient fields are not serialized"),
        FieldQuery::Field { public: false, .. } => Some("only public fields are serialized"),
        _ => None,
    }
}

pub fn deserializer_rejection(deserializer: &Deserializer) -> Option<&'static str> {
    match deserializer {
        Deserializer::CustomPrimitive(cp) => match cp.source {
            PrimitiveDeserializerSource::Constructor { public: false } => Some(PUBLIC_CONSTRUCTORS_ONLY),
            PrimitiveDeserializerSource::FactoryMethod { public, is_static, .. } if !(public && is_static) => {
                Some(PUBLIC_STATIC_METHODS_ONLY)
            }
            _ => None,
        },
        Deserializer::SerializedObject(so) => match so.factory {
            ObjectFactory::Constructor { public: false } => Some(PUBLIC_CONSTRUCTORS_ONLY),
            ObjectFactory::FactoryMethod { public, is_static, .. } if !(public && is_static) => {
                Some(PUBLIC_STATIC_METHODS_ONLY)
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsmith_core::candidate::SerializedObjectDeserializer;
    use mapsmith_core::TypeIdentifier;
    use rstest::rstest;

    #[rstest]
    #[case(true, false, false, Some("only public fields are serialized"))]
    #[case(true, true, false, Some("static fields are not serialized"))]
    #[case(false, false, true, Some("transient fields are not serialized"))]
    #[case(false, false, false, None)]
    fn test_field_filters(
        #[case] private: bool,
        #[case] is_static: bool,
        #[case] transient: bool,
        #[case] expected: Option<&str>,
    ) {
        let field = SerializationField {
            name: "x".into(),
            field_type: TypeIdentifier::class("String"),
            query: FieldQuery::Field {
                public: !private,
                is_static,
                transient,
            },
        };
        assert_eq!(serialization_field_rejection(&field), expected);
    }

    #[test]
    fn test_private_constructor_is_rejected() {
        let deserializer = Deserializer::SerializedObject(SerializedObjectDeserializer {
            fields: Default::default(),
            factory: ObjectFactory::Constructor { public: false },
        });
        assert_eq!(deserializer_rejection(&deserializer), Some(PUBLIC_CONSTRUCTORS_ONLY));
    }
}
