//! Choosing one serializer and one deserializer out of the detected candidates.
//!
//! Collections, maps and polymorphic types are settled by shape. Everything else is
//! filtered, then resolved per direction: a single direction goes through the
//! priority picker, duplex types first try a symmetric custom primitive and
//! then a symmetric serialized object.

pub mod fields;
pub mod filters;
pub mod picker;
pub mod symmetry;

use crate::context::ResolutionContext;
use crate::detector::{DetectedPair, DetectionFailure, DetectionResult};
use crate::diagnostics::ScanLedger;
use crate::error::ErrorKind;
use fields::SerializationFieldOptions;
use mapsmith_core::{Deserializer, DetectionRequirements, Direction, Serializer, TypeIdentifier};
use symmetry::SymmetryBuilder;
use tracing::trace;

const INSUFFICIENT_SYMMETRY: &str = "insufficient symmetry";

/// Everything the factories produced for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub serializers: Vec<Serializer>,
    pub deserializers: Vec<Deserializer>,
}

/// Candidates that survived the filters, grouped by how they are resolved.
#[derive(Debug, Default)]
struct Options {
    primitive_serializers: Vec<Serializer>,
    primitive_deserializers: Vec<Deserializer>,
    field_options: SerializationFieldOptions,
    object_deserializers: Vec<Deserializer>,
}

/// Strikes a serializer in the ledger; serialized objects are tracked per field.
pub(crate) fn strike_serializer(ledger: &mut ScanLedger, serializer: &Serializer, reason: &str) {
    match serializer {
        Serializer::SerializedObject(so) => {
            for field in &so.fields {
                ledger.strike_serialization_field(field, reason);
            }
        }
        other => ledger.strike_serializer(other, reason),
    }
}

fn less_priority_than(description: &str) -> String {
    format!("less priority than {}", description)
}

fn record(candidates: &Candidates, ledger: &mut ScanLedger) {
    for serializer in &candidates.serializers {
        match serializer {
            Serializer::SerializedObject(so) => so.fields.iter().for_each(|f| ledger.add_serialization_field(f)),
            other => ledger.add_serializer(other),
        }
    }
    for deserializer in &candidates.deserializers {
        ledger.add_deserializer(deserializer);
    }
}

pub fn disambiguate(
    ty: &TypeIdentifier,
    requirements: DetectionRequirements,
    candidates: Candidates,
    ledger: &mut ScanLedger,
    context: &ResolutionContext,
) -> DetectionResult<DetectedPair> {
    record(&candidates, ledger);
    if let Some(pair) = by_shape(&candidates, requirements, ledger)? {
        return Ok(pair);
    }
    let options = split(candidates, requirements, ledger);
    trace!(
        "Disambiguating {} ({}) over {} primitive serializers, {} primitive deserializers and {} object deserializers",
        ty,
        requirements,
        options.primitive_serializers.len(),
        options.primitive_deserializers.len(),
        options.object_deserializers.len()
    );
    match requirements.direction() {
        Some(Direction::Duplex) => duplex(options, ledger, context),
        Some(Direction::Serialization) => serialization_only(options, ledger, context),
        Some(Direction::Deserialization) => deserialization_only(options, ledger, context),
        None => Err(DetectionFailure::new(
            ErrorKind::NoCandidates,
            format!("type '{}' is not required in any direction", ty),
        )),
    }
}

fn serializer_shape_rank(serializer: &Serializer) -> Option<u8> {
    match serializer {
        Serializer::InlinedCollection(_) | Serializer::Map(_) => Some(0),
        Serializer::Polymorphic(_) => Some(1),
        _ => None,
    }
}

fn deserializer_shape_rank(deserializer: &Deserializer) -> Option<u8> {
    match deserializer {
        Deserializer::InlinedCollection(_) | Deserializer::Map(_) => Some(0),
        Deserializer::Polymorphic(_) => Some(1),
        _ => None,
    }
}

fn best_by_rank<T: Clone>(candidates: &[T], rank: impl Fn(&T) -> Option<u8>) -> Option<T> {
    candidates
        .iter()
        .filter_map(|c| rank(c).map(|r| (r, c)))
        .min_by_key(|(r, _)| *r)
        .map(|(_, c)| c.clone())
}

/// Inlined collections and maps win over polymorphic types, which win over anything else.
fn by_shape(
    candidates: &Candidates,
    requirements: DetectionRequirements,
    ledger: &mut ScanLedger,
) -> DetectionResult<Option<DetectedPair>> {
    let serializer = best_by_rank(&candidates.serializers, serializer_shape_rank);
    let deserializer = best_by_rank(&candidates.deserializers, deserializer_shape_rank);
    if serializer.is_none() && deserializer.is_none() {
        return Ok(None);
    }
    if requirements.serialization && serializer.is_none() {
        return Err(DetectionFailure::new(ErrorKind::NoCandidates, "no serializers to choose from"));
    }
    if requirements.deserialization && deserializer.is_none() {
        return Err(DetectionFailure::new(ErrorKind::NoCandidates, "no deserializers to choose from"));
    }
    if let Some(winner) = &serializer {
        let reason = less_priority_than(&winner.description());
        ledger.strike_other_serializers(winner, &reason);
        ledger.strike_other_serialization_fields(&[], &reason);
    }
    if let Some(winner) = &deserializer {
        ledger.strike_other_deserializers(winner, &less_priority_than(&winner.description()));
    }
    Ok(Some(DetectedPair {
        serializer,
        deserializer,
    }))
}

fn split(candidates: Candidates, requirements: DetectionRequirements, ledger: &mut ScanLedger) -> Options {
    let mut options = Options::default();
    for serializer in candidates.serializers {
        match serializer {
            Serializer::CustomPrimitive(_) if requirements.has_to_be_object => {
                ledger.strike_serializer(&serializer, filters::HAS_TO_BE_OBJECT);
            }
            Serializer::CustomPrimitive(_) => options.primitive_serializers.push(serializer),
            Serializer::SerializedObject(so) => {
                for field in so.fields {
                    match filters::serialization_field_rejection(&field) {
                        Some(reason) => ledger.strike_serialization_field(&field, reason),
                        None => options.field_options.add(field),
                    }
                }
            }
            Serializer::InlinedCollection(_) | Serializer::Map(_) | Serializer::Polymorphic(_) => {}
        }
    }
    for deserializer in candidates.deserializers {
        if deserializer.is_custom_primitive() && requirements.has_to_be_object {
            ledger.strike_deserializer(&deserializer, filters::HAS_TO_BE_OBJECT);
            continue;
        }
        if let Some(reason) = filters::deserializer_rejection(&deserializer) {
            ledger.strike_deserializer(&deserializer, reason);
            continue;
        }
        match deserializer {
            Deserializer::CustomPrimitive(_) => options.primitive_deserializers.push(deserializer),
            Deserializer::SerializedObject(_) => options.object_deserializers.push(deserializer),
            Deserializer::InlinedCollection(_) | Deserializer::Map(_) | Deserializer::Polymorphic(_) => {}
        }
    }
    options
}

fn ambiguous_fields(problems: &[String]) -> DetectionFailure {
    let lines: Vec<String> = problems.iter().map(|p| format!("\t- {}", p)).collect();
    DetectionFailure::new(
        ErrorKind::AmbiguousCandidates,
        format!("ambiguous serialization fields:\n{}", lines.join("\n")),
    )
}

fn serialization_only(
    options: Options,
    ledger: &mut ScanLedger,
    context: &ResolutionContext,
) -> DetectionResult<DetectedPair> {
    let mut pool = options.primitive_serializers;
    if !options.field_options.is_empty() {
        match options.field_options.instantiate_all().instantiate(ledger) {
            Ok(object) => pool.push(Serializer::SerializedObject(object)),
            Err(problems) if pool.is_empty() => return Err(ambiguous_fields(&problems)),
            Err(_) => {}
        }
    }
    let serializer = picker::pick_serializer(pool, ledger, context)?;
    if serializer.is_custom_primitive() {
        ledger.strike_other_serialization_fields(&[], &less_priority_than(&serializer.description()));
    }
    Ok(DetectedPair {
        serializer: Some(serializer),
        deserializer: None,
    })
}

fn deserialization_only(
    options: Options,
    ledger: &mut ScanLedger,
    context: &ResolutionContext,
) -> DetectionResult<DetectedPair> {
    let mut pool = options.primitive_deserializers;
    pool.extend(options.object_deserializers);
    let deserializer = picker::pick_deserializer(pool, ledger, context)?;
    Ok(DetectedPair {
        serializer: None,
        deserializer: Some(deserializer),
    })
}

fn duplex(options: Options, ledger: &mut ScanLedger, context: &ResolutionContext) -> DetectionResult<DetectedPair> {
    if let Some(base) =
        symmetry::primitive::symmetric_base(&options.primitive_serializers, &options.primitive_deserializers)
    {
        let serializers = symmetry::primitive::serializers_of(options.primitive_serializers, base);
        let deserializers = symmetry::primitive::deserializers_of(options.primitive_deserializers, base);
        let serializer = picker::pick_serializer(serializers, ledger, context)?;
        let deserializer = picker::pick_deserializer(deserializers, ledger, context)?;

        let serializer_reason = less_priority_than(&serializer.description());
        ledger.strike_other_serializers(&serializer, &serializer_reason);
        ledger.strike_other_serialization_fields(&[], &serializer_reason);
        ledger.strike_other_deserializers(&deserializer, &less_priority_than(&deserializer.description()));
        return Ok(DetectedPair {
            serializer: Some(serializer),
            deserializer: Some(deserializer),
        });
    }

    let no_candidates = options.primitive_serializers.is_empty()
        && options.primitive_deserializers.is_empty()
        && options.field_options.is_empty()
        && options.object_deserializers.is_empty();
    if no_candidates {
        return Err(DetectionFailure::new(
            ErrorKind::NoCandidates,
            "no serializers or deserializers to choose from",
        ));
    }

    let mut builder = SymmetryBuilder::new(context);
    for deserializer in &options.object_deserializers {
        builder.add_deserializer(deserializer);
    }
    builder.add_serializer(&options.field_options);
    let class = builder.determine()?;
    let (instantiation, deserializers) = class.into_parts();
    let instantiation = instantiation.ok_or_else(|| {
        DetectionFailure::new(ErrorKind::AsymmetricDuplex, "no symmetric result")
    })?;
    let object = instantiation.instantiate(ledger).map_err(|problems| ambiguous_fields(&problems))?;

    let serializer = Serializer::SerializedObject(object);
    ledger.strike_other_serializers(&serializer, INSUFFICIENT_SYMMETRY);
    if let Serializer::SerializedObject(object) = &serializer {
        ledger.strike_other_serialization_fields(&object.fields, INSUFFICIENT_SYMMETRY);
    }
    let deserializer = picker::pick_deserializer(deserializers, ledger, context)?;
    ledger.strike_other_deserializers(&deserializer, INSUFFICIENT_SYMMETRY);
    Ok(DetectedPair {
        serializer: Some(serializer),
        deserializer: Some(deserializer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use mapsmith_core::candidate::{
        CustomPrimitiveDeserializer, CustomPrimitiveSerializer, InlinedCollection, SerializationField,
        SerializedObjectDeserializer, SerializedObjectSerializer,
    };
    use mapsmith_core::PrimitiveKind;

    fn string() -> TypeIdentifier {
        TypeIdentifier::class("String")
    }

    fn duplex_requirements() -> DetectionRequirements {
        DetectionRequirements {
            serialization: true,
            deserialization: true,
            has_to_be_object: false,
        }
    }

    fn object_serializer(fields: &[&str]) -> Serializer {
        Serializer::SerializedObject(SerializedObjectSerializer::new(
            fields
                .iter()
                .map(|f| SerializationField::public_field(*f, string()))
                .collect(),
        ))
    }

    fn object_deserializer(fields: &[&str]) -> Deserializer {
        let fields: IndexMap<String, TypeIdentifier> = fields.iter().map(|f| (f.to_string(), string())).collect();
        Deserializer::SerializedObject(SerializedObjectDeserializer::constructor(fields))
    }

    fn run(
        requirements: DetectionRequirements,
        candidates: Candidates,
        context: &ResolutionContext,
    ) -> (DetectionResult<DetectedPair>, ScanLedger) {
        let mut ledger = ScanLedger::new();
        let result = disambiguate(&TypeIdentifier::class("Subject"), requirements, candidates, &mut ledger, context);
        (result, ledger)
    }

    #[test]
    fn test_symmetric_custom_primitive_beats_serialized_object() {
        let cp_serializer = Serializer::CustomPrimitive(CustomPrimitiveSerializer::method(PrimitiveKind::String, "stringValue"));
        let cp_deserializer =
            Deserializer::CustomPrimitive(CustomPrimitiveDeserializer::factory_method(PrimitiveKind::String, "fromString"));
        let candidates = Candidates {
            serializers: vec![cp_serializer.clone(), object_serializer(&["value"])],
            deserializers: vec![cp_deserializer.clone(), object_deserializer(&["value"])],
        };
        let (result, ledger) = run(duplex_requirements(), candidates, &ResolutionContext::default());
        let pair = result.unwrap();
        assert_eq!(pair.serializer, Some(cp_serializer));
        assert_eq!(pair.deserializer, Some(cp_deserializer));
        assert!(!ledger.serialization_fields()[0].strikes.is_empty());
        assert!(!ledger.deserializers()[1].strikes.is_empty());
    }

    #[test]
    fn test_duplex_object_uses_exactly_the_deserializer_fields() {
        let candidates = Candidates {
            serializers: vec![object_serializer(&["a", "b", "c"])],
            deserializers: vec![object_deserializer(&["a", "b"])],
        };
        let (result, ledger) = run(duplex_requirements(), candidates, &ResolutionContext::default());
        let pair = result.unwrap();
        match pair.serializer {
            Some(Serializer::SerializedObject(object)) => assert_eq!(object.field_names(), vec!["a", "b"]),
            other => panic!("unexpected serializer {:?}", other),
        }
        assert_eq!(ledger.serialization_fields()[2].strikes, vec![INSUFFICIENT_SYMMETRY]);
    }

    #[test]
    fn test_duplex_without_symmetry_is_asymmetric() {
        let candidates = Candidates {
            serializers: vec![object_serializer(&["a"])],
            deserializers: vec![object_deserializer(&["a", "b"])],
        };
        let (result, _) = run(duplex_requirements(), candidates, &ResolutionContext::default());
        let failure = result.unwrap_err();
        assert_eq!(failure.kind, ErrorKind::AsymmetricDuplex);
        assert!(failure.message.starts_with("no symmetric result"));
        assert!(failure.message.contains("No field under the name 'b'"));
    }

    #[test]
    fn test_duplex_without_candidates() {
        let (result, _) = run(duplex_requirements(), Candidates::default(), &ResolutionContext::default());
        assert_eq!(result.unwrap_err().message, "no serializers or deserializers to choose from");
    }

    #[test]
    fn test_collection_shape_wins() {
        let collection = InlinedCollection::new(string());
        let candidates = Candidates {
            serializers: vec![
                object_serializer(&["size"]),
                Serializer::InlinedCollection(collection.clone()),
            ],
            deserializers: vec![Deserializer::InlinedCollection(collection.clone())],
        };
        let (result, ledger) = run(duplex_requirements(), candidates, &ResolutionContext::default());
        let pair = result.unwrap();
        assert_eq!(pair.serializer, Some(Serializer::InlinedCollection(collection)));
        assert_eq!(ledger.serialization_fields()[0].strikes.len(), 1);
    }

    #[test]
    fn test_object_enforcing_strikes_custom_primitives() {
        let candidates = Candidates {
            serializers: vec![Serializer::CustomPrimitive(CustomPrimitiveSerializer::built_in(
                PrimitiveKind::String,
            ))],
            deserializers: Vec::new(),
        };
        let requirements = DetectionRequirements {
            serialization: true,
            deserialization: false,
            has_to_be_object: true,
        };
        let (result, ledger) = run(requirements, candidates, &ResolutionContext::default());
        assert_eq!(result.unwrap_err().kind, ErrorKind::NoCandidates);
        assert_eq!(ledger.serializers()[0].strikes, vec![filters::HAS_TO_BE_OBJECT]);
    }

    #[test]
    fn test_serialization_only_takes_every_public_field() {
        let candidates = Candidates {
            serializers: vec![object_serializer(&["a", "b"])],
            deserializers: Vec::new(),
        };
        let requirements = DetectionRequirements {
            serialization: true,
            deserialization: false,
            has_to_be_object: false,
        };
        let (result, _) = run(requirements, candidates, &ResolutionContext::default());
        let pair = result.unwrap();
        assert!(pair.deserializer.is_none());
        assert_eq!(pair.serializer, Some(object_serializer(&["a", "b"])));
    }

    #[test]
    fn test_injected_parameter_yields_larger_signature() {
        let injected = TypeIdentifier::class("Clock");
        let context = ResolutionContext::default().with_injected(injected.clone());
        let mut with_clock: IndexMap<String, TypeIdentifier> = IndexMap::new();
        with_clock.insert("a".into(), string());
        with_clock.insert("b".into(), injected.clone());
        let wide = Deserializer::SerializedObject(SerializedObjectDeserializer::constructor(with_clock));
        let serializer = Serializer::SerializedObject(SerializedObjectSerializer::new(vec![
            SerializationField::public_field("a", string()),
            SerializationField::public_field("b", injected),
        ]));
        let candidates = Candidates {
            serializers: vec![serializer.clone()],
            deserializers: vec![wide.clone(), object_deserializer(&["a"])],
        };
        let (result, _) = run(duplex_requirements(), candidates, &context);
        let pair = result.unwrap();
        assert_eq!(pair.serializer, Some(serializer));
        assert_eq!(pair.deserializer, Some(wide));
    }
}
